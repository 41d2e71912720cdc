//! # Pack Demo
//!
//! Generates a grid of UV spheres over a ground plane, packs them into
//! 16-bit-indexable chunks and logs the resulting chunk table.
//!
//! ```text
//! pack_demo --spheres 64 --segments 64 --rings 32 --label scene
//! RUST_LOG=debug pack_demo --vertex-limit 4096
//! ```

use std::process::ExitCode;

use clap::Parser;

use tessera_core::PackResult;
use tessera_core::math::Vec3;
use tessera_core::mesh::generators::{generate_plane, generate_sphere};
use tessera_core::mesh::{CHUNK_VERTEX_CAPACITY, GeometryBuilder, GeometryChunk};

/// Spacing between sphere centers on the grid.
const GRID_SPACING: f32 = 3.0;

/// Tessera geometry packing demo.
#[derive(Parser, Debug)]
#[command(
    name = "pack_demo",
    about = "Pack procedural geometry into 16-bit-indexable chunks"
)]
struct Args {
    /// Number of spheres to generate.
    #[arg(long, default_value_t = 32)]
    spheres: u32,

    /// Longitudinal segments per sphere.
    #[arg(long, default_value_t = 64)]
    segments: u32,

    /// Latitudinal rings per sphere.
    #[arg(long, default_value_t = 32)]
    rings: u32,

    /// Per-chunk vertex limit (clamped to the 16-bit capacity).
    #[arg(long, default_value_t = CHUNK_VERTEX_CAPACITY)]
    vertex_limit: usize,

    /// Label prefix for the produced chunks.
    #[arg(long, default_value = "scene")]
    label: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Tessera Pack Demo");
    tessera_core::init();

    let args = Args::parse();
    log::debug!("{args:?}");

    match run(&args) {
        Ok(chunks) => {
            report(&chunks);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Packing failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> PackResult<Vec<GeometryChunk>> {
    let mut builder = GeometryBuilder::new()
        .with_vertex_limit(args.vertex_limit)
        .with_label(args.label.as_str());

    let columns = (args.spheres as f32).sqrt().ceil().max(1.0) as u32;
    let mut sphere = generate_sphere(1.0, args.segments, args.rings);
    log::info!(
        "Packing {} spheres of {} vertices each",
        args.spheres,
        sphere.vertex_count()
    );

    let mut previous = Vec3::zeros();
    for i in 0..args.spheres {
        let center = Vec3::new(
            (i % columns) as f32 * GRID_SPACING,
            1.0,
            (i / columns) as f32 * GRID_SPACING,
        );
        // Move the generated sphere instead of regenerating it.
        let offset = center - previous;
        for position in &mut sphere.positions {
            *position += offset;
        }
        previous = center;

        builder.pack(&sphere.as_batch())?;
    }

    // The plane carries vertex colors, so it cannot share a chunk with the
    // spheres.
    builder.flush();
    let extent = columns as f32 * GRID_SPACING;
    // (subdivisions + 1)^2 vertices must stay below the limit.
    let max_subdivisions = ((builder.vertex_limit() - 1) as f32).sqrt() as u32;
    let subdivisions = (columns * 4).min(max_subdivisions.saturating_sub(1));
    let mut plane = generate_plane(extent, extent, subdivisions);
    let corner = (extent - GRID_SPACING) / 2.0;
    for position in &mut plane.positions {
        *position += Vec3::new(corner, 0.0, corner);
    }
    builder.pack(&plane.as_batch())?;

    Ok(builder.into_chunks())
}

fn report(chunks: &[GeometryChunk]) {
    let mut total_vertices = 0;
    let mut total_triangles = 0;

    for chunk in chunks {
        log::info!(
            "{:<12} {:>6} vertices {:>7} triangles  {:?}",
            chunk.label().unwrap_or("<unnamed>"),
            chunk.vertex_count(),
            chunk.triangle_count(),
            chunk.channels()
        );
        total_vertices += chunk.vertex_count();
        total_triangles += chunk.triangle_count();
    }

    log::info!(
        "{} chunks, {} vertices, {} triangles",
        chunks.len(),
        total_vertices,
        total_triangles
    );
}
