//! HTTP server layer for the grid splitter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │        POST /upload  ·  GET /health  ·  GET /static/...         │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────────┐  ┌───────────────────┐   │
//! │  │  handlers   │  │     routes       │  │     ServeDir      │   │
//! │  │ (requests)  │  │ (router config)  │  │ (artifact files)  │   │
//! │  └─────────────┘  └──────────────────┘  └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    generate_unique_name, health_handler, root_handler, upload_handler, AppState, HealthResponse,
    ServiceInfoResponse, UploadData, UploadResponse, UPLOAD_FIELD,
};
pub use routes::{create_router, RouterConfig, DEFAULT_MAX_UPLOAD_BYTES};
