#![cfg(not(target_os = "espidf"))]

use std::collections::HashSet;

use led_matrix_board::board::BoardConfig;
use led_matrix_board::color::palette;
use led_matrix_board::frame::{FrameBuffer, encode_frame, parse_frame};
use led_matrix_board::mapping::{CoordinateMapper, MatrixGeometry, Orientation, WiringTopology};
use test_case::test_case;

/// Helper: build a mapper for the given panel.
fn mapper(
    width: u16,
    height: u16,
    wiring: WiringTopology,
    flip_x: bool,
    flip_y: bool,
) -> CoordinateMapper {
    let geometry = MatrixGeometry::new(width, height).expect("valid test geometry");
    CoordinateMapper::new(geometry, wiring, Orientation { flip_x, flip_y })
}

/// Helper: physical indices of every logical position, row by row.
fn all_indices(m: &CoordinateMapper) -> Vec<usize> {
    let geometry = m.geometry();
    (0..geometry.height())
        .flat_map(|y| (0..geometry.width()).map(move |x| (x, y)))
        .map(|(x, y)| m.map_position(x, y))
        .collect()
}

// ---------------------------------------------------------------
// Every LED is reachable exactly once
// ---------------------------------------------------------------

#[test_case(WiringTopology::RowMajor, false, false; "row major")]
#[test_case(WiringTopology::RowMajor, true, false; "row major flip x")]
#[test_case(WiringTopology::RowMajor, false, true; "row major flip y")]
#[test_case(WiringTopology::RowMajor, true, true; "row major flip both")]
#[test_case(WiringTopology::Serpentine, false, false; "serpentine")]
#[test_case(WiringTopology::Serpentine, true, false; "serpentine flip x")]
#[test_case(WiringTopology::Serpentine, false, true; "serpentine flip y")]
#[test_case(WiringTopology::Serpentine, true, true; "serpentine flip both")]
fn eight_by_eight_is_a_bijection(wiring: WiringTopology, flip_x: bool, flip_y: bool) {
    let m = mapper(8, 8, wiring, flip_x, flip_y);
    let indices = all_indices(&m);

    assert_eq!(indices.len(), 64);
    let unique: HashSet<usize> = indices.iter().copied().collect();
    assert_eq!(unique, (0..64).collect::<HashSet<_>>(), "every LED exactly once");
}

#[test_case(12, 4, WiringTopology::Serpentine; "wide serpentine")]
#[test_case(3, 7, WiringTopology::Serpentine; "tall serpentine with odd height")]
#[test_case(5, 1, WiringTopology::RowMajor; "single row")]
#[test_case(1, 5, WiringTopology::Serpentine; "single column")]
fn other_geometries_are_bijections(width: u16, height: u16, wiring: WiringTopology) {
    for (flip_x, flip_y) in [(false, false), (true, false), (false, true), (true, true)] {
        let m = mapper(width, height, wiring, flip_x, flip_y);
        let mut indices = all_indices(&m);
        indices.sort_unstable();
        assert_eq!(indices, (0..m.len()).collect::<Vec<_>>());
    }
}

// ---------------------------------------------------------------
// Output stays in bounds for any input
// ---------------------------------------------------------------

#[test]
fn any_input_stays_in_bounds() {
    let m = mapper(8, 8, WiringTopology::Serpentine, true, false);
    let probes = [0, 1, 6, 7, 8, 9, 255, 1000, usize::MAX];

    for x in probes {
        for y in probes {
            assert!(m.map_position(x, y) < 64, "({x}, {y}) escaped the buffer");
        }
    }
}

#[test]
fn clamped_input_matches_edge() {
    let m = mapper(8, 8, WiringTopology::RowMajor, false, false);
    assert_eq!(m.map_position(8, 0), m.map_position(7, 0));
    assert_eq!(m.map_position(8, 0), 7);
    assert_eq!(m.map_position(3, 99), m.map_position(3, 7));
}

#[test]
fn mapper_is_shareable_across_threads() {
    let m = BoardConfig::ESP32_S3_MATRIX.mapper();
    let handles: Vec<_> = (0..4)
        .map(|y| std::thread::spawn(move || (0..8).map(|x| m.map_position(x, y)).collect::<Vec<_>>()))
        .collect();

    for (y, handle) in handles.into_iter().enumerate() {
        let row = handle.join().expect("mapping thread should not panic");
        assert_eq!(row, (y * 8..y * 8 + 8).collect::<Vec<_>>());
    }
}

// ---------------------------------------------------------------
// Frame dump is independent of wiring
// ---------------------------------------------------------------

#[test]
fn frame_dump_is_identical_across_wirings() {
    let draw = |m: CoordinateMapper| {
        let mut frame = FrameBuffer::new(m);
        frame.set(0, 0, palette::RED);
        frame.set(6, 3, palette::PURPLE);
        encode_frame(&frame)
    };

    let plain = draw(mapper(8, 8, WiringTopology::RowMajor, false, false));
    let snake = draw(mapper(8, 8, WiringTopology::Serpentine, true, true));
    assert_eq!(plain, snake);

    let pixels = parse_frame(&plain, BoardConfig::ESP32_S3_MATRIX.geometry).expect("dump should parse");
    assert_eq!(pixels[0], palette::RED);
    assert_eq!(pixels[3 * 8 + 6], palette::PURPLE);
}

#[test]
fn preset_frame_dump_has_expected_length() {
    let frame = FrameBuffer::new(BoardConfig::ESP32_S3_MATRIX.mapper());
    let line = encode_frame(&frame);

    assert!(line.starts_with("FRAME:000000,"));
    assert!(line.ends_with("000000,"));
    assert_eq!(line.len(), "FRAME:".len() + 64 * 7);
}
