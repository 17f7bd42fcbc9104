//! AXP2101 driver.
//! Provides blocking I2C accessors; the async version mirrors this API behind the `async` feature.

use crate::data_types::{BatteryStatus, LdoChannel, PowerKeyEvents};
use crate::error::Error;
use crate::registers::{
    addr, code_to_ldo_mv, compose_h6l8, decode_battery_status, ldo_mv_to_code, AdcChannelBits, ChargeCtrlBits,
    CommonConfigBits, PwrKeyIrqBits, Status1Bits, ALDO_ALL, DEFAULT_I2C_ADDRESS, PWRKEY_CLEAR,
};

/// AXP2101 driver handle.
///
/// Holds the bus exclusively; wrap the handle in a mutex (or share the bus through
/// `embedded-hal-bus`) when several tasks need it.
pub struct Axp2101<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Axp2101<I2C> {
    /// Create a new driver instance with the default I2C address (0x34). No bus traffic.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_I2C_ADDRESS,
        }
    }

    /// Create a new driver instance with a custom I2C address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Return the 7-bit I2C address configured for this instance.
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Release the underlying bus.
    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Axp2101<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Create a driver at the default address and run [`init`](Self::init).
    pub fn try_new(i2c: I2C) -> Result<Self, Error<I2C::Error>> {
        let mut dev = Self::new(i2c);
        dev.init()?;
        Ok(dev)
    }

    /// Enable power-key IRQ latching, the battery-voltage ADC and the four ALDO outputs.
    ///
    /// Only enable bits change; ALDO voltage codes keep their reset values. A failure part-way
    /// leaves the earlier steps applied.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_reg_bits(addr::INTEN2, PwrKeyIrqBits::all().bits(), true)?;
        self.set_reg_bits(addr::ADC_CHANNEL_CTRL, AdcChannelBits::BATT_VOLTAGE.bits(), true)?;
        self.set_reg_bits(addr::LDO_ONOFF_CTRL0, ALDO_ALL.bits(), true)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("AXP2101 @ {=u8:#x}: initialized", self.address);
        Ok(())
    }

    /// Write a single register.
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(Error::I2c)
    }

    /// Read a single register.
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    /// Read a burst starting at a register.
    pub fn read_regs(&mut self, start_reg: u8, data: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[start_reg], data)
            .map_err(Error::I2c)
    }

    /// Read a 14-bit value spread over `reg` (high 6 bits) and `reg + 1` in one transaction.
    pub fn read_reg14(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_regs(reg, &mut buf)?;
        Ok(compose_h6l8(buf[0], buf[1]))
    }

    /// Update masked bits in a register (read-modify-write).
    ///
    /// Not retried: a failed read leaves the register untouched, a failed write leaves it at
    /// its old value.
    pub fn update_reg(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let cur = self.read_reg(reg)?;
        let new = (cur & !mask) | (value & mask);
        self.write_reg(reg, new)
    }

    /// Set (`enabled`) or clear every bit of `mask` in `reg`, preserving the others.
    pub fn set_reg_bits(&mut self, reg: u8, mask: u8, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.update_reg(reg, mask, if enabled { mask } else { 0 })
    }

    /// Soft power-off. Cuts power to the PMIC's outputs, normally including the caller's own.
    pub fn power_off(&mut self) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("AXP2101: power off");
        self.set_reg_bits(addr::COMMON_CONFIG, CommonConfigBits::SOFT_PWROFF.bits(), true)
    }

    /// Read and acknowledge latched power-key events.
    ///
    /// If either flag is set both are cleared, so each press is reported once.
    pub fn power_key_was_pressed(&mut self) -> Result<PowerKeyEvents, Error<I2C::Error>> {
        let bits = PwrKeyIrqBits::from_bits_truncate(self.read_reg(addr::INTSTS2)?);
        let events = PowerKeyEvents {
            short_press: bits.contains(PwrKeyIrqBits::SHORT_PRESS),
            long_press: bits.contains(PwrKeyIrqBits::LONG_PRESS),
        };
        if events.any() {
            #[cfg(feature = "defmt")]
            defmt::debug!("AXP2101: power key {}", events);
            self.write_reg(addr::INTSTS2, PWRKEY_CLEAR)?;
        }
        Ok(events)
    }

    pub fn is_battery_connected(&mut self) -> Result<bool, Error<I2C::Error>> {
        let bits = Status1Bits::from_bits_truncate(self.read_reg(addr::STATUS1)?);
        Ok(bits.contains(Status1Bits::BATTERY_PRESENT))
    }

    /// Fuel-gauge state of charge in percent. Meaningless without a battery.
    pub fn battery_level(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_reg(addr::BATTERY_PERCENT)
    }

    /// Battery voltage in mV (the ADC reports 1 mV per LSB).
    pub fn battery_voltage_mv(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_reg14(addr::ADC_BATT_VOLTAGE_H)
    }

    pub fn battery_charging_enabled(&mut self) -> Result<bool, Error<I2C::Error>> {
        let bits = ChargeCtrlBits::from_bits_truncate(self.read_reg(addr::CHARGE_GAUGE_WDT_CTRL)?);
        Ok(bits.contains(ChargeCtrlBits::CELL_CHARGE_EN))
    }

    pub fn set_battery_charging_enabled(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.set_reg_bits(
            addr::CHARGE_GAUGE_WDT_CTRL,
            ChargeCtrlBits::CELL_CHARGE_EN.bits(),
            enabled,
        )
    }

    /// Battery charge direction, or `None` when no battery is present or the IC reports
    /// the reserved code.
    pub fn battery_status(&mut self) -> Result<Option<BatteryStatus>, Error<I2C::Error>> {
        if !self.is_battery_connected()? {
            return Ok(None);
        }
        let status2 = self.read_reg(addr::STATUS2)?;
        Ok(decode_battery_status(status2))
    }

    /// True when the channel's output enable bit is set.
    pub fn is_ldo_enabled(&mut self, channel: LdoChannel) -> Result<bool, Error<I2C::Error>> {
        let spec = channel.spec();
        Ok((self.read_reg(spec.enable_reg)? & spec.enable_mask) != 0)
    }

    /// Program a regulator output in mV; 0 switches it off.
    ///
    /// Accepts `0..=max_mv` for the channel. Values below 500 mV also switch the output off
    /// and leave the voltage register alone. Other values are truncated down to the channel's
    /// step, written to the voltage register, and then the output is enabled.
    pub fn set_ldo_mv(&mut self, channel: LdoChannel, mv: u16) -> Result<(), Error<I2C::Error>> {
        let spec = channel.spec();
        if mv > spec.max_mv {
            return Err(Error::VoltageOutOfRange);
        }
        match ldo_mv_to_code(spec, mv) {
            Some(code) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("AXP2101: {} -> {} mV (code {})", channel, mv, code);
                self.write_reg(spec.voltage_reg, code)?;
                self.set_reg_bits(spec.enable_reg, spec.enable_mask, true)
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::debug!("AXP2101: {} off", channel);
                self.set_reg_bits(spec.enable_reg, spec.enable_mask, false)
            }
        }
    }

    /// Read back a regulator output in mV; 0 when the output is disabled.
    pub fn get_ldo_mv(&mut self, channel: LdoChannel) -> Result<u16, Error<I2C::Error>> {
        if !self.is_ldo_enabled(channel)? {
            return Ok(0);
        }
        let spec = channel.spec();
        let code = self.read_reg(spec.voltage_reg)?;
        Ok(code_to_ldo_mv(spec, code))
    }
}

#[cfg(feature = "async")]
impl<I2C> Axp2101<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Async version of [`init`](Self::init).
    pub async fn init_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_reg_bits_async(addr::INTEN2, PwrKeyIrqBits::all().bits(), true)
            .await?;
        self.set_reg_bits_async(addr::ADC_CHANNEL_CTRL, AdcChannelBits::BATT_VOLTAGE.bits(), true)
            .await?;
        self.set_reg_bits_async(addr::LDO_ONOFF_CTRL0, ALDO_ALL.bits(), true)
            .await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("AXP2101 @ {=u8:#x}: initialized", self.address);
        Ok(())
    }

    /// Async version of [`write_reg`](Self::write_reg).
    pub async fn write_reg_async(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .await
            .map_err(Error::I2c)
    }

    /// Async version of [`read_reg`](Self::read_reg).
    pub async fn read_reg_async(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    /// Async version of [`read_regs`](Self::read_regs).
    pub async fn read_regs_async(&mut self, start_reg: u8, data: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[start_reg], data)
            .await
            .map_err(Error::I2c)
    }

    /// Async version of [`read_reg14`](Self::read_reg14).
    pub async fn read_reg14_async(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_regs_async(reg, &mut buf).await?;
        Ok(compose_h6l8(buf[0], buf[1]))
    }

    /// Async version of [`update_reg`](Self::update_reg).
    pub async fn update_reg_async(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        let cur = self.read_reg_async(reg).await?;
        let new = (cur & !mask) | (value & mask);
        self.write_reg_async(reg, new).await
    }

    /// Async version of [`set_reg_bits`](Self::set_reg_bits).
    pub async fn set_reg_bits_async(&mut self, reg: u8, mask: u8, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.update_reg_async(reg, mask, if enabled { mask } else { 0 })
            .await
    }

    /// Async version of [`power_off`](Self::power_off).
    pub async fn power_off_async(&mut self) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("AXP2101: power off");
        self.set_reg_bits_async(addr::COMMON_CONFIG, CommonConfigBits::SOFT_PWROFF.bits(), true)
            .await
    }

    /// Async version of [`power_key_was_pressed`](Self::power_key_was_pressed).
    pub async fn power_key_was_pressed_async(&mut self) -> Result<PowerKeyEvents, Error<I2C::Error>> {
        let bits = PwrKeyIrqBits::from_bits_truncate(self.read_reg_async(addr::INTSTS2).await?);
        let events = PowerKeyEvents {
            short_press: bits.contains(PwrKeyIrqBits::SHORT_PRESS),
            long_press: bits.contains(PwrKeyIrqBits::LONG_PRESS),
        };
        if events.any() {
            #[cfg(feature = "defmt")]
            defmt::debug!("AXP2101: power key {}", events);
            self.write_reg_async(addr::INTSTS2, PWRKEY_CLEAR).await?;
        }
        Ok(events)
    }

    /// Async version of [`is_battery_connected`](Self::is_battery_connected).
    pub async fn is_battery_connected_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        let bits = Status1Bits::from_bits_truncate(self.read_reg_async(addr::STATUS1).await?);
        Ok(bits.contains(Status1Bits::BATTERY_PRESENT))
    }

    /// Async version of [`battery_level`](Self::battery_level).
    pub async fn battery_level_async(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_reg_async(addr::BATTERY_PERCENT).await
    }

    /// Async version of [`battery_voltage_mv`](Self::battery_voltage_mv).
    pub async fn battery_voltage_mv_async(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_reg14_async(addr::ADC_BATT_VOLTAGE_H).await
    }

    /// Async version of [`battery_charging_enabled`](Self::battery_charging_enabled).
    pub async fn battery_charging_enabled_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        let bits = ChargeCtrlBits::from_bits_truncate(self.read_reg_async(addr::CHARGE_GAUGE_WDT_CTRL).await?);
        Ok(bits.contains(ChargeCtrlBits::CELL_CHARGE_EN))
    }

    /// Async version of [`set_battery_charging_enabled`](Self::set_battery_charging_enabled).
    pub async fn set_battery_charging_enabled_async(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.set_reg_bits_async(
            addr::CHARGE_GAUGE_WDT_CTRL,
            ChargeCtrlBits::CELL_CHARGE_EN.bits(),
            enabled,
        )
        .await
    }

    /// Async version of [`battery_status`](Self::battery_status).
    pub async fn battery_status_async(&mut self) -> Result<Option<BatteryStatus>, Error<I2C::Error>> {
        if !self.is_battery_connected_async().await? {
            return Ok(None);
        }
        let status2 = self.read_reg_async(addr::STATUS2).await?;
        Ok(decode_battery_status(status2))
    }

    /// Async version of [`is_ldo_enabled`](Self::is_ldo_enabled).
    pub async fn is_ldo_enabled_async(&mut self, channel: LdoChannel) -> Result<bool, Error<I2C::Error>> {
        let spec = channel.spec();
        Ok((self.read_reg_async(spec.enable_reg).await? & spec.enable_mask) != 0)
    }

    /// Async version of [`set_ldo_mv`](Self::set_ldo_mv).
    pub async fn set_ldo_mv_async(&mut self, channel: LdoChannel, mv: u16) -> Result<(), Error<I2C::Error>> {
        let spec = channel.spec();
        if mv > spec.max_mv {
            return Err(Error::VoltageOutOfRange);
        }
        match ldo_mv_to_code(spec, mv) {
            Some(code) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("AXP2101: {} -> {} mV (code {})", channel, mv, code);
                self.write_reg_async(spec.voltage_reg, code).await?;
                self.set_reg_bits_async(spec.enable_reg, spec.enable_mask, true)
                    .await
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::debug!("AXP2101: {} off", channel);
                self.set_reg_bits_async(spec.enable_reg, spec.enable_mask, false)
                    .await
            }
        }
    }

    /// Async version of [`get_ldo_mv`](Self::get_ldo_mv).
    pub async fn get_ldo_mv_async(&mut self, channel: LdoChannel) -> Result<u16, Error<I2C::Error>> {
        if !self.is_ldo_enabled_async(channel).await? {
            return Ok(0);
        }
        let spec = channel.spec();
        let code = self.read_reg_async(spec.voltage_reg).await?;
        Ok(code_to_ldo_mv(spec, code))
    }
}
