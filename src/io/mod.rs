// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for basemap images and map documents.

pub mod media;
pub mod serialization;
