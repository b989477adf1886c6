// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod controller;
pub mod error;
pub mod forms;
pub mod ids;
pub mod model;
pub mod screens;
pub mod seed;
pub mod state;
pub mod storage;
pub mod view;

pub use controller::*;
pub use error::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use screens::*;
pub use seed::*;
pub use state::*;
pub use storage::*;
pub use view::*;
