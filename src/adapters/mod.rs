//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements    | Connects to                 |
//! |---------------|---------------|-----------------------------|
//! | `hardware`    | LightPort     | Parallel-port data register |
//! | `http_source` | StatusSource  | Jenkins JSON API over HTTP  |
//! | `log_sink`    | EventSink     | `log` facade / stderr       |
//! | `time`        | DelayNs       | OS sleep                    |

pub mod hardware;
pub mod http_source;
pub mod log_sink;
pub mod time;
