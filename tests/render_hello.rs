//! End-to-end render of the string "HELLO" at version 1, level L.
//!
//! These tests pin the geometry contract: module size math, finder exclusion,
//! and the ring-and-dot eye shapes, both at the command level and in the
//! rasterized pixels.

use dot_qr::{
    is_finder_module, module_size, DrawCommand, EcLevel, ImageFormat, QrOptions, QrRenderer, Size,
    VersionSpec,
};
use image::Rgba;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn hello_renderer() -> QrRenderer {
    let mut options = QrOptions::new("HELLO");
    options.version = VersionSpec::Fixed(1);
    options.ec_level = EcLevel::L;
    options.background = Some(WHITE);
    QrRenderer::try_new(options).expect("HELLO fits version 1 at level L")
}

#[test]
fn hello_geometry_contract() {
    let renderer = hello_renderer();
    let grid = renderer.grid().unwrap();
    assert_eq!(grid.size(), 21);
    assert_eq!(module_size(Size::square(210.0), grid.size(), false), 10.0);

    // (0, 0) is inside the top-left finder zone and must not get a module dot.
    assert!(is_finder_module(0, 0, grid.size()));

    let picture = renderer.to_picture(Size::square(210.0));
    let commands = picture.commands();

    assert!(!commands.iter().any(|c| matches!(
        c,
        DrawCommand::Circle { center, .. } if *center == (0.0, 0.0)
    )));
    assert!(commands.contains(&DrawCommand::Ring {
        center: (30.0, 30.0),
        radius: 30.0,
        stroke_width: 10.0,
        color: BLACK,
    }));
    assert!(commands.contains(&DrawCommand::Circle {
        center: (30.0, 30.0),
        radius: 15.0,
        color: BLACK,
    }));
}

#[test]
fn hello_rasterized_eye_pixels() {
    let renderer = hello_renderer();
    let picture = renderer.to_picture(Size::square(210.0));
    let img = picture.rasterize(210, 210);

    // Center of the top-left eye: inside the inner dot.
    assert_eq!(*img.get_pixel(30, 30), BLACK);
    // Between dot (radius 15) and ring band (25..35 from center): background.
    assert_eq!(*img.get_pixel(50, 30), WHITE);
    // On the ring stroke centerline.
    assert_eq!(*img.get_pixel(60, 30), BLACK);
}

#[test]
fn hello_png_export_is_deterministic() {
    let renderer = hello_renderer();
    let a = renderer
        .to_image_data(Size::square(210.0), ImageFormat::Png)
        .unwrap();
    let b = renderer
        .to_image_data(Size::square(210.0), ImageFormat::Png)
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(&a[..4], &[0x89, b'P', b'N', b'G']);
}

#[test]
fn overflowing_version_1_never_draws() {
    let mut options = QrOptions::new("A".repeat(500));
    options.version = VersionSpec::Fixed(1);
    options.background = Some(WHITE);
    let renderer = QrRenderer::new(options, None);
    assert!(renderer.has_failed());
    assert!(renderer.to_picture(Size::square(210.0)).commands().is_empty());
    assert!(renderer
        .to_image_data(Size::square(210.0), ImageFormat::Png)
        .is_err());
}
