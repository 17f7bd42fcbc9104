//! Error definitions for AXP2101 driver.

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<I2cError> {
    /// Underlying I2C transaction failed (NACK, arbitration loss, timeout...).
    I2c(I2cError),
    /// Requested regulator voltage is outside `0..=max` for the channel.
    VoltageOutOfRange,
    /// Raw regulator index does not name an LDO/DLDO channel.
    InvalidChannel,
}

impl<I2cError: core::fmt::Debug> core::fmt::Display for Error<I2cError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::VoltageOutOfRange => write!(f, "LDO voltage out of range"),
            Error::InvalidChannel => write!(f, "invalid LDO/DLDO number"),
        }
    }
}

/// Returned by `LdoChannel::try_from(u8)` for indices above 7.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidChannel(pub u8);

impl<I2cError> From<InvalidChannel> for Error<I2cError> {
    fn from(_: InvalidChannel) -> Self {
        Error::InvalidChannel
    }
}

impl core::fmt::Display for InvalidChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid LDO/DLDO number: {}", self.0)
    }
}
