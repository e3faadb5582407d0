//! Walks through the main uses of the library, writing every image to `output/`.
//!
//! Usage: cargo run --bin showcase
//!
//! Set `RUST_LOG=qrtint=debug` for placement details.

use std::fs;
use std::path::Path;

use anyhow::Context;
use qrtint::{BatchJob, OverlaySpec, QrComposer, QrRequest};

const OUTPUT_DIR: &str = "output";
const LOGO_PATH: &str = "sample_logo.png";

fn banner(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn colored(data: &str, fill: &str, back: &str, box_size: u32) -> qrtint::Result<QrRequest> {
    QrRequest::new(data)
        .fill_color_str(fill)?
        .back_color_str(back)?
        .box_size(box_size)
}

fn write_one(composer: &QrComposer, request: qrtint::Result<QrRequest>, path: &str, label: &str) {
    match request.and_then(|request| composer.generate_and_save(&request, path, None)) {
        Ok(_) => println!("✓ Generated {}: {}", label, path),
        Err(e) => println!("✗ Failed {}: {}", label, e),
    }
}

fn simple_colored(composer: &QrComposer) {
    banner("Example 1: Simple Colored QR Codes");

    let colors = [
        ("Blue", "#1f77b4", "white"),
        ("Red", "#d62728", "#ffffcc"),
        ("Green", "#2ca02c", "white"),
        ("Purple", "#9467bd", "#f0f0f0"),
    ];

    for (name, fill, back) in colors {
        let slug = name.to_lowercase();
        let request = colored(&format!("https://example.com/{}", slug), fill, back, 10);
        let path = format!("{}/qrcode_{}.png", OUTPUT_DIR, slug);
        write_one(composer, request, &path, &format!("{} QR code", name));
    }
}

fn different_data(composer: &QrComposer) {
    banner("Example 2: QR Codes for Different Data Types");

    let data_types = [
        ("URL", "https://www.github.com", "#1f77b4"),
        ("Email", "contact@example.com", "#d62728"),
        ("Phone", "tel:+1234567890", "#2ca02c"),
        ("WiFi", "WIFI:T:WPA;S:NetworkName;P:Password;;", "#ff7f0e"),
        ("Text", "Hello, this is a QR code!", "#9467bd"),
    ];

    for (name, data, fill) in data_types {
        let request = colored(data, fill, "white", 8);
        let path = format!("{}/qr_{}.png", OUTPUT_DIR, name.to_lowercase());
        write_one(composer, request, &path, &format!("{} QR code", name));
    }
}

fn custom_sizing(composer: &QrComposer) {
    banner("Example 3: QR Codes with Different Box Sizes");

    for box_size in [5, 10, 15, 20] {
        let request = colored("https://example.com", "#1f77b4", "white", box_size);
        let path = format!("{}/qr_boxsize_{}.png", OUTPUT_DIR, box_size);
        write_one(composer, request, &path, &format!("QR code with box size {}", box_size));
    }
}

fn missing_logo_help(absolute: &Path) -> Vec<String> {
    vec![
        format!("ℹ Logo file '{}' not found.", LOGO_PATH),
        "  To use this feature:".to_string(),
        format!("  1. Place your PNG logo at: {}", absolute.display()),
        "  2. Run this example again".to_string(),
        "\n  Tip: You can create a sample logo using:".to_string(),
        format!(
            "  - Rust: image::RgbaImage::new(200, 200).save(\"{}\")",
            LOGO_PATH
        ),
        format!("  - Or download any PNG image and save it as '{}'", LOGO_PATH),
    ]
}

fn with_logo(composer: &QrComposer) {
    banner("Example 4: QR Code with Embedded Logo");

    let logo_path = Path::new(LOGO_PATH);
    if !logo_path.exists() {
        let absolute = std::env::current_dir()
            .map(|dir| dir.join(logo_path))
            .unwrap_or_else(|_| logo_path.to_path_buf());
        for line in missing_logo_help(&absolute) {
            println!("{}", line);
        }
        return;
    }

    let outcome = colored("https://github.com", "#2ca02c", "white", 10).and_then(|request| {
        let logo = OverlaySpec::from_path(logo_path, 0.25)?;
        composer.generate_and_save(&request, format!("{}/qr_with_logo.png", OUTPUT_DIR), Some(&logo))
    });
    match outcome {
        Ok(_) => println!("✓ QR code with embedded logo generated successfully!"),
        Err(e) => println!("✗ Error embedding logo: {}", e),
    }
}

fn batch_generation(composer: &QrComposer) {
    banner("Example 5: Batch QR Code Generation");

    let products = [
        ("Product A", "https://example.com/product/a", "#1f77b4"),
        ("Product B", "https://example.com/product/b", "#d62728"),
        ("Product C", "https://example.com/product/c", "#2ca02c"),
        ("Product D", "https://example.com/product/d", "#ff7f0e"),
    ];

    let mut jobs = Vec::new();
    let mut names = Vec::new();
    for (name, url, fill) in products {
        let suffix = name.split_whitespace().nth(1).unwrap_or(name).to_lowercase();
        match colored(url, fill, "white", 10) {
            Ok(request) => {
                jobs.push(BatchJob::new(request, format!("{}/qr_product_{}.png", OUTPUT_DIR, suffix)));
                names.push(name);
            }
            Err(e) => println!("✗ Skipping {}: {}", name, e),
        }
    }

    for (name, outcome) in names.iter().zip(composer.generate_batch(&jobs)) {
        match outcome {
            Ok(path) => println!("✓ Generated QR for {}: {}", name, path.display()),
            Err(e) => println!("✗ Failed {}: {}", name, e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("qrtint=info")).init();

    banner("QR Code Generator - Advanced Examples");

    fs::create_dir_all(OUTPUT_DIR).with_context(|| format!("failed to create {}", OUTPUT_DIR))?;
    let composer = QrComposer::new();

    simple_colored(&composer);
    different_data(&composer);
    custom_sizing(&composer);
    with_logo(&composer);
    batch_generation(&composer);

    banner("All examples completed! Check the 'output' folder for results.");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_logo_help_explains_how_to_make_one() {
        let help = missing_logo_help(Path::new("/work/sample_logo.png"));

        assert_eq!(help[0], "ℹ Logo file 'sample_logo.png' not found.");
        assert!(help.iter().any(|line| line == "  1. Place your PNG logo at: /work/sample_logo.png"));
        assert!(help.iter().any(|line| line.contains("Tip: You can create a sample logo")));
        assert!(help.iter().any(|line| line.contains("RgbaImage::new(200, 200)")));
        assert!(help.last().unwrap().contains("download any PNG image"));
    }
}
