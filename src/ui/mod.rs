// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Carta application.

pub mod canvas;
pub mod properties;
pub mod toolbar;
