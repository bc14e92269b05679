// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Carta - Cartographic Annotation Tool
//!
//! A cross-platform desktop application for viewing vector maps and
//! annotating them with point, line and polygon features.

mod app;
mod editor;
mod io;
mod map;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::CartaApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 768.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Carta - Cartographic Annotation Tool"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Carta",
        options,
        Box::new(|_cc| Ok(Box::new(CartaApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
