//! Register map and constants for AXP2101.
//! Only the registers this driver touches are listed; addresses and bit positions follow the datasheet.

use crate::data_types::{BatteryStatus, LdoChannel, LdoSpec};

/// Fixed 7-bit I2C address of the AXP2101.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x34;

/// Register addresses.
pub mod addr {
    /// Status 1: VBUS good, BATFET, battery present, battery active...
    pub const STATUS1: u8 = 0x00;
    /// Status 2: charge direction (bits 6:5), power-on state, charger state.
    pub const STATUS2: u8 = 0x01;
    /// Common configuration (soft power-off in bit 0).
    pub const COMMON_CONFIG: u8 = 0x10;
    /// Charger, fuel gauge and watchdog enables.
    pub const CHARGE_GAUGE_WDT_CTRL: u8 = 0x18;
    /// ADC channel enables.
    pub const ADC_CHANNEL_CTRL: u8 = 0x30;
    /// Battery voltage ADC, high 6 bits. The low byte at 0x35 is reached by auto-increment.
    pub const ADC_BATT_VOLTAGE_H: u8 = 0x34;
    /// IRQ enable 2 (power key events).
    pub const INTEN2: u8 = 0x41;
    /// IRQ status 2, write-1-to-clear.
    pub const INTSTS2: u8 = 0x49;
    /// LDO on/off control 0: ALDO1-4, BLDO1-2, CPUSLDO, DLDO1.
    pub const LDO_ONOFF_CTRL0: u8 = 0x90;
    /// LDO on/off control 1: DLDO2.
    pub const LDO_ONOFF_CTRL1: u8 = 0x91;
    pub const ALDO1_VOLTAGE: u8 = 0x92;
    pub const ALDO2_VOLTAGE: u8 = 0x93;
    pub const ALDO3_VOLTAGE: u8 = 0x94;
    pub const ALDO4_VOLTAGE: u8 = 0x95;
    pub const BLDO1_VOLTAGE: u8 = 0x96;
    pub const BLDO2_VOLTAGE: u8 = 0x97;
    pub const DLDO1_VOLTAGE: u8 = 0x99;
    pub const DLDO2_VOLTAGE: u8 = 0x9A;
    /// Fuel gauge state of charge, 0-100 %.
    pub const BATTERY_PERCENT: u8 = 0xA4;
}

/// Every LDO output starts at 500 mV (code 0).
pub const LDO_MIN_MV: u16 = 500;
/// ALDO/BLDO/DLDO1 step.
pub const LDO_STEP_MV: u16 = 100;
/// DLDO2 step.
pub const DLDO2_STEP_MV: u16 = 50;
pub const ALDO_BLDO_MAX_MV: u16 = 3_500;
pub const DLDO1_MAX_MV: u16 = 3_400;
pub const DLDO2_MAX_MV: u16 = 1_400;

/// Charge direction field in STATUS2.
pub const STATUS2_CHARGE_DIR_MASK: u8 = 0b0110_0000;
pub const STATUS2_CHARGE_DIR_SHIFT: u8 = 5;

/// Value written to INTSTS2 to acknowledge both power-key events.
pub const PWRKEY_CLEAR: u8 = PwrKeyIrqBits::all().bits();

bitflags::bitflags! {
    /// STATUS1 register bits (0x00).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Status1Bits: u8 {
        const VBUS_GOOD       = 1 << 5;
        const BATFET_OPEN     = 1 << 4;
        /// Bit 3: battery detected.
        const BATTERY_PRESENT = 1 << 3;
        const BATTERY_ACTIVE  = 1 << 2;
        const THERMAL_REG     = 1 << 1;
        const CURRENT_LIMIT   = 1 << 0;
    }

    /// COMMON_CONFIG register bits (0x10).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CommonConfigBits: u8 {
        /// Bit 0: soft power-off. Cuts every rail, including the host's.
        const SOFT_PWROFF = 1 << 0;
    }

    /// CHARGE_GAUGE_WDT_CTRL register bits (0x18).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChargeCtrlBits: u8 {
        /// Bit 1: cell battery charge enable.
        const CELL_CHARGE_EN = 1 << 1;
    }

    /// ADC_CHANNEL_CTRL register bits (0x30).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AdcChannelBits: u8 {
        /// Bit 0: battery voltage measurement.
        const BATT_VOLTAGE = 1 << 0;
    }

    /// Power-key bits shared by INTEN2 (0x41) and INTSTS2 (0x49).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PwrKeyIrqBits: u8 {
        /// Bit 3: short press.
        const SHORT_PRESS = 1 << 3;
        /// Bit 2: long press.
        const LONG_PRESS  = 1 << 2;
    }

    /// LDO_ONOFF_CTRL0 register bits (0x90).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LdoOnOff0Bits: u8 {
        const ALDO1   = 1 << 0;
        const ALDO2   = 1 << 1;
        const ALDO3   = 1 << 2;
        const ALDO4   = 1 << 3;
        const BLDO1   = 1 << 4;
        const BLDO2   = 1 << 5;
        const CPUSLDO = 1 << 6;
        const DLDO1   = 1 << 7;
    }

    /// LDO_ONOFF_CTRL1 register bits (0x91).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LdoOnOff1Bits: u8 {
        const DLDO2 = 1 << 0;
    }
}

/// All four ALDO enables, set by `init`.
pub const ALDO_ALL: LdoOnOff0Bits = LdoOnOff0Bits::ALDO1
    .union(LdoOnOff0Bits::ALDO2)
    .union(LdoOnOff0Bits::ALDO3)
    .union(LdoOnOff0Bits::ALDO4);

const fn aldo_bldo(enable: LdoOnOff0Bits, voltage_reg: u8) -> LdoSpec {
    LdoSpec {
        enable_reg: addr::LDO_ONOFF_CTRL0,
        enable_mask: enable.bits(),
        voltage_reg,
        min_mv: LDO_MIN_MV,
        max_mv: ALDO_BLDO_MAX_MV,
        step_mv: LDO_STEP_MV,
    }
}

/// Per-channel regulator constants, indexed by `LdoChannel as usize`.
pub const LDO_SPECS: [LdoSpec; LdoChannel::COUNT] = [
    aldo_bldo(LdoOnOff0Bits::ALDO1, addr::ALDO1_VOLTAGE),
    aldo_bldo(LdoOnOff0Bits::ALDO2, addr::ALDO2_VOLTAGE),
    aldo_bldo(LdoOnOff0Bits::ALDO3, addr::ALDO3_VOLTAGE),
    aldo_bldo(LdoOnOff0Bits::ALDO4, addr::ALDO4_VOLTAGE),
    aldo_bldo(LdoOnOff0Bits::BLDO1, addr::BLDO1_VOLTAGE),
    aldo_bldo(LdoOnOff0Bits::BLDO2, addr::BLDO2_VOLTAGE),
    LdoSpec {
        enable_reg: addr::LDO_ONOFF_CTRL0,
        enable_mask: LdoOnOff0Bits::DLDO1.bits(),
        voltage_reg: addr::DLDO1_VOLTAGE,
        min_mv: LDO_MIN_MV,
        max_mv: DLDO1_MAX_MV,
        step_mv: LDO_STEP_MV,
    },
    LdoSpec {
        enable_reg: addr::LDO_ONOFF_CTRL1,
        enable_mask: LdoOnOff1Bits::DLDO2.bits(),
        voltage_reg: addr::DLDO2_VOLTAGE,
        min_mv: LDO_MIN_MV,
        max_mv: DLDO2_MAX_MV,
        step_mv: DLDO2_STEP_MV,
    },
];

/// Convert a requested LDO voltage to its register code, truncating toward zero.
///
/// Returns `None` when the request disables the output: 0 mV, and also anything
/// below the 500 mV floor. Callers range-check against `max_mv` first.
pub fn ldo_mv_to_code(spec: &LdoSpec, mv: u16) -> Option<u8> {
    if mv < spec.min_mv {
        return None;
    }
    Some(((mv - spec.min_mv) / spec.step_mv) as u8)
}

/// Convert an LDO register code back to millivolts. The code is not masked or clamped.
pub fn code_to_ldo_mv(spec: &LdoSpec, code: u8) -> u16 {
    code as u16 * spec.step_mv + spec.min_mv
}

/// Compose a 14-bit ADC value: high register contributes bits 13:8 (top two bits ignored).
pub fn compose_h6l8(high: u8, low: u8) -> u16 {
    (((high & 0x3F) as u16) << 8) | low as u16
}

/// Decode the STATUS2 charge-direction field. The reserved code 0b11 yields `None`.
pub fn decode_battery_status(status2: u8) -> Option<BatteryStatus> {
    match (status2 & STATUS2_CHARGE_DIR_MASK) >> STATUS2_CHARGE_DIR_SHIFT {
        0b00 => Some(BatteryStatus::Standby),
        0b01 => Some(BatteryStatus::Charging),
        0b10 => Some(BatteryStatus::Discharging),
        _ => None,
    }
}
