//! Data types exchanged with the AXP2101 driver.

use crate::error::InvalidChannel;
use crate::registers::LDO_SPECS;

/// Battery charge direction decoded from STATUS2.
///
/// The driver reports "no battery" and the reserved code as `None` instead of a fourth variant.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BatteryStatus {
    /// Battery is powering the system.
    Discharging,
    /// Neither charging nor discharging.
    Standby,
    Charging,
}

/// Latched power-key events, as returned by `power_key_was_pressed`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PowerKeyEvents {
    pub short_press: bool,
    pub long_press: bool,
}

impl PowerKeyEvents {
    /// True when either press was latched.
    pub fn any(&self) -> bool {
        self.short_press || self.long_press
    }
}

/// Programmable linear regulator outputs.
///
/// The discriminant is the raw channel index (0 = ALDO1 ... 7 = DLDO2).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum LdoChannel {
    Aldo1 = 0,
    Aldo2 = 1,
    Aldo3 = 2,
    Aldo4 = 3,
    Bldo1 = 4,
    Bldo2 = 5,
    Dldo1 = 6,
    Dldo2 = 7,
}

impl LdoChannel {
    pub const COUNT: usize = 8;

    pub const ALL: [LdoChannel; Self::COUNT] = [
        LdoChannel::Aldo1,
        LdoChannel::Aldo2,
        LdoChannel::Aldo3,
        LdoChannel::Aldo4,
        LdoChannel::Bldo1,
        LdoChannel::Bldo2,
        LdoChannel::Dldo1,
        LdoChannel::Dldo2,
    ];

    /// Register layout and voltage range for this channel.
    pub fn spec(self) -> &'static LdoSpec {
        &LDO_SPECS[self as usize]
    }
}

impl TryFrom<u8> for LdoChannel {
    type Error = InvalidChannel;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        LdoChannel::ALL
            .get(index as usize)
            .copied()
            .ok_or(InvalidChannel(index))
    }
}

/// One row of the regulator table.
///
/// Code `n` programs `min_mv + n * step_mv`. Requests between 1 mV and `min_mv - 1`
/// are accepted and switch the output off, exactly like 0 mV.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LdoSpec {
    /// Register holding the on/off bit.
    pub enable_reg: u8,
    pub enable_mask: u8,
    /// Register holding the voltage code.
    pub voltage_reg: u8,
    pub min_mv: u16,
    pub max_mv: u16,
    pub step_mv: u16,
}
