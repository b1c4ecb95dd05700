// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalogue;
pub mod chart;
pub mod dates;
pub mod model;
pub mod state;

pub use catalogue::*;
pub use chart::*;
pub use dates::*;
pub use model::*;
pub use state::*;
