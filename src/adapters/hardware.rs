//! Hardware adapter — bridges the parallel-port driver to [`LightPort`].
//!
//! This is the only module in the system that writes to real hardware.
//! Write failures never reach the core: the first failure is logged, the
//! following ones stay quiet until a write succeeds again.

use std::fs::File;
use std::io::{Seek, Write};

use log::{error, info};

use crate::app::ports::LightPort;
use crate::drivers::parport::ParallelPort;

/// Traffic light on the parallel port.
pub struct HardwareLight<W: Write + Seek = File> {
    port: ParallelPort<W>,
    failing: bool,
}

impl<W: Write + Seek> HardwareLight<W> {
    pub fn new(port: ParallelPort<W>) -> Self {
        Self {
            port,
            failing: false,
        }
    }

    /// Whether the last write failed.
    pub fn is_failing(&self) -> bool {
        self.failing
    }

    pub fn port(&self) -> &ParallelPort<W> {
        &self.port
    }
}

impl<W: Write + Seek> LightPort for HardwareLight<W> {
    fn write(&mut self, value: u8) {
        match self.port.write(value) {
            Ok(()) => {
                if self.failing {
                    info!("parport: writes succeeding again");
                }
                self.failing = false;
            }
            Err(e) => {
                if !self.failing {
                    error!("parport: {}", e);
                }
                self.failing = true;
            }
        }
    }
}

impl<W: Write + Seek> Drop for HardwareLight<W> {
    fn drop(&mut self) {
        info!("parport: released 0x{:x}", self.port.address());
    }
}
