use tinyvg::geom::{Angle, Fixed};
use tinyvg::path::Path;
use tinyvg::{document_dimensions, render, NullSink};

fn f(n: i32) -> Fixed {
    Fixed::from_int(n)
}

// magic, v1, scale=0 enc=U8888 range=REDUCED, w=16 h=16, 1 color red, END.
const MINIMAL_DOCUMENT: &[u8] = &[0x72, 0x56, 0x01, 0x40, 0x10, 0x10, 0x01, 0xFF, 0x00, 0x00, 0xFF, 0x00];

#[test]
fn document_dimensions_and_render_agree_on_size() {
    let (width, height) = document_dimensions(MINIMAL_DOCUMENT).unwrap();
    assert_eq!((width, height), (16, 16));

    let mut sink = NullSink;
    render(MINIMAL_DOCUMENT, &mut sink).unwrap();
}

#[test]
fn a_rectangle_path_has_the_expected_bounds() {
    let mut path = Path::new();
    path.rectangle(f(0), f(0), f(10), f(5));
    let bounds = path.bounds();
    assert_eq!((bounds.x, bounds.y, bounds.w, bounds.h), (0, 0, 10, 5));
}

#[test]
fn a_full_turn_arc_closes_into_a_loop() {
    let mut path = Path::new();
    path.move_to(f(0), f(0));
    path.arc(f(0), f(0), f(1), f(1), Angle::ZERO, Angle::FULL);
    path.close();
    assert_eq!(path.points()[0], *path.points().last().unwrap());
}

#[test]
fn truncated_input_is_an_io_error() {
    let mut sink = NullSink;
    let truncated = &MINIMAL_DOCUMENT[..4];
    assert!(render(truncated, &mut sink).is_err());
}

#[test]
fn rejects_a_document_with_a_bad_magic_number() {
    let bad = [0u8, 0, 1, 0, 0, 0];
    assert!(document_dimensions(&bad[..]).is_err());
}
