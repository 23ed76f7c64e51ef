//! Parallel-port data register driver.
//!
//! Writes one byte per value to the port I/O device at the data register
//! address. The device handle is acquired in [`ParallelPort::open`] and
//! released when the driver is dropped.
//!
//! ## Dual-target design
//!
//! On Linux: `/dev/port` opened for writing (needs root or `CAP_SYS_RAWIO`).
//! On host/test: any `Write + Seek` sink, e.g. an in-memory cursor.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};

use log::info;

use crate::error::OutputError;

pub struct ParallelPort<W: Write + Seek = File> {
    io: W,
    address: u16,
}

impl ParallelPort<File> {
    /// Acquire the port I/O device.
    pub fn open(device: &str, address: u16) -> Result<Self, OutputError> {
        let io = OpenOptions::new()
            .write(true)
            .open(device)
            .map_err(|source| OutputError::Open {
                device: device.to_owned(),
                source,
            })?;
        info!("parport: claimed {} at 0x{:x}", device, address);
        Ok(Self::with_io(io, address))
    }
}

impl<W: Write + Seek> ParallelPort<W> {
    pub fn with_io(io: W, address: u16) -> Self {
        Self { io, address }
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn io(&self) -> &W {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut W {
        &mut self.io
    }

    /// Put `value` on the data lines.
    pub fn write(&mut self, value: u8) -> Result<(), OutputError> {
        self.io
            .seek(SeekFrom::Start(u64::from(self.address)))
            .and_then(|_| self.io.write_all(&[value]))
            .and_then(|()| self.io.flush())
            .map_err(|source| OutputError::Write {
                address: self.address,
                value,
                source,
            })
    }
}
