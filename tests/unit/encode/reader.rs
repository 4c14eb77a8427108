use std::io::Cursor;

use super::*;

use crate::encode::binary::write_setup;

fn sample_setup() -> SimulationSetup {
    SimulationSetup {
        header: SimulationHeader::new(2, 2, [false, true], 0.1667),
        render: RenderParams {
            window_width: 800,
            window_height: 200,
            steps_per_frame: 20,
            quantities: vec![
                RenderQuantity {
                    identifier: "speed".to_string(),
                    offset: 0.0,
                    amplitude: 8.0,
                },
                RenderQuantity {
                    identifier: "vorticity".to_string(),
                    offset: 0.5,
                    amplitude: 30.0,
                },
            ],
        },
        tracers: TracerVisuals {
            color: [0.0, 1.0, 0.0, 1.0],
            size: 2.5,
            emission_rate: 0.25,
            random_initial: 1,
        },
        grid: DomainGrid {
            width: 2,
            height: 2,
            cell_type: vec![
                CellKind::Solid,
                CellKind::Fluid,
                CellKind::Inflow,
                CellKind::Outflow,
            ],
            density: vec![1.0, 1.0, 1.02, 0.98],
            velocity_x: vec![0.0, 0.1, 0.15, 0.0],
            velocity_y: vec![0.0, 0.0, 0.0, 0.0],
        },
        tracer_seeds: vec![1],
    }
}

#[test]
fn roundtrip_preserves_every_field() {
    let setup = sample_setup();

    let mut buf = Vec::new();
    write_setup(&mut buf, &setup).unwrap();
    let decoded = read_setup(&mut Cursor::new(&buf)).unwrap();

    assert_eq!(decoded, setup);
}

#[test]
fn roundtrip_of_empty_tracer_list() {
    let mut setup = sample_setup();
    setup.tracer_seeds.clear();

    let mut buf = Vec::new();
    write_setup(&mut buf, &setup).unwrap();
    let decoded = read_setup(&mut Cursor::new(&buf)).unwrap();

    assert!(decoded.tracer_seeds.is_empty());
    assert_eq!(decoded, setup);
}

#[test]
fn unknown_cell_type_byte_is_rejected() {
    let mut setup = sample_setup();
    setup.render.quantities.clear();
    setup.tracer_seeds.clear();

    let mut buf = Vec::new();
    write_setup(&mut buf, &setup).unwrap();

    // With no tracer seeds, the stream ends with the u64 count and the
    // three f64 grid arrays; the cell type run sits just before them.
    let n = setup.grid.len();
    let first_cell_pos = buf.len() - 8 - 3 * 8 * n - n;
    buf[first_cell_pos] = 9;

    let err = read_setup(&mut Cursor::new(&buf)).unwrap_err();
    assert!(err.to_string().contains("unknown cell type byte 9"));
}

#[test]
fn truncated_stream_is_an_error() {
    let setup = sample_setup();

    let mut buf = Vec::new();
    write_setup(&mut buf, &setup).unwrap();
    buf.truncate(buf.len() - 3);

    assert!(read_setup(&mut Cursor::new(&buf)).is_err());
}
