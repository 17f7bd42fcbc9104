//! AXP2101 Rust Driver
//!
//! Blocking (and, behind the `async` feature, async) I2C driver for the X-Powers
//! AXP2101 power management IC. Covers battery telemetry, power-key event latching,
//! software power-off and the ALDO/BLDO/DLDO linear regulators.
//!
//! ```no_run
//! use axp2101_rs::{Axp2101, Error, LdoChannel};
//! # use embedded_hal::i2c::I2c;
//! # fn example<I: I2c>(i2c: I) -> Result<(), Error<I::Error>> {
//! let mut pmic = Axp2101::new(i2c);
//! pmic.init()?;
//!
//! // Initialization only flips enable bits, so program a voltage first.
//! pmic.set_ldo_mv(LdoChannel::Aldo1, 3300)?;
//!
//! if pmic.is_battery_connected()? {
//!     let _mv = pmic.battery_voltage_mv()?;
//!     let _status = pmic.battery_status()?;
//! }
//! # Ok(())
//! # }
//! ```

#![no_std]

pub mod data_types;
pub mod driver;
pub mod error;
pub mod registers;

pub use data_types::{BatteryStatus, LdoChannel, PowerKeyEvents};
pub use driver::Axp2101;
pub use error::{Error, InvalidChannel};
pub use registers::DEFAULT_I2C_ADDRESS;
