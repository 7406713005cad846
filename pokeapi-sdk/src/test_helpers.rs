// ABOUTME: Test helper utilities for mocking PokeAPI responses and sprites
// ABOUTME: Provides mockito-based helpers and in-memory PNG fixtures

use image::{ImageFormat, Rgba, RgbaImage};
use mockito::{Server, ServerGuard};
use serde_json::json;
use std::io::Cursor;

pub async fn mock_pokeapi_server() -> ServerGuard {
    Server::new_async().await
}

pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encoding an in-memory PNG should not fail");
    bytes
}

/// A 4x4 transparent sprite with one opaque white pixel in the middle.
pub fn sample_sprite() -> RgbaImage {
    let mut img = RgbaImage::new(4, 4);
    img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
    img
}

pub fn mock_creature_response(server_url: &str, id: u32, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "base_experience": 64,
        "sprites": {
            "front_default": format!("{}/sprites/{}.png", server_url, id),
            "back_default": format!("{}/sprites/back/{}.png", server_url, id),
            "front_shiny": null
        }
    })
}

pub fn mock_list_response(server_url: &str, names: &[&str]) -> serde_json::Value {
    let results: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "name": name,
                "url": format!("{}/api/v2/pokemon/{}/", server_url, i + 1)
            })
        })
        .collect();

    json!({
        "count": names.len(),
        "next": null,
        "previous": null,
        "results": results
    })
}
