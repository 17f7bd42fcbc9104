#![cfg(feature = "async")]

use embassy_futures::block_on;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use axp2101_rs::data_types::{BatteryStatus, LdoChannel, PowerKeyEvents};
use axp2101_rs::driver::Axp2101;
use axp2101_rs::error::Error;

const ADDR: u8 = 0x34;

#[test]
fn init_async_sets_enable_bits() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x41], vec![0x40]),
        I2cTrans::write(ADDR, vec![0x41, 0x4C]),
        I2cTrans::write_read(ADDR, vec![0x30], vec![0x00]),
        I2cTrans::write(ADDR, vec![0x30, 0x01]),
        I2cTrans::write_read(ADDR, vec![0x90], vec![0x80]),
        I2cTrans::write(ADDR, vec![0x90, 0x8F]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    block_on(driver.init_async()).unwrap();
    driver.free().done();
}

#[test]
fn init_async_stops_at_first_bus_error() {
    let expectations = [I2cTrans::write_read(ADDR, vec![0x41], vec![0x00]).with_error(ErrorKind::Other)];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    assert_eq!(block_on(driver.init_async()), Err(Error::I2c(ErrorKind::Other)));
    driver.free().done();
}

#[test]
fn set_aldo1_1800mv_async() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x92, 13]),
        I2cTrans::write_read(ADDR, vec![0x90], vec![0x00]),
        I2cTrans::write(ADDR, vec![0x90, 0x01]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    block_on(driver.set_ldo_mv_async(LdoChannel::Aldo1, 1_800)).unwrap();
    driver.free().done();
}

#[test]
fn set_dldo2_1200mv_async() {
    // (1200 - 500) / 50 = 14
    let expectations = [
        I2cTrans::write(ADDR, vec![0x9A, 14]),
        I2cTrans::write_read(ADDR, vec![0x91], vec![0x00]),
        I2cTrans::write(ADDR, vec![0x91, 0x01]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    block_on(driver.set_ldo_mv_async(LdoChannel::Dldo2, 1_200)).unwrap();
    driver.free().done();
}

#[test]
fn set_ldo_async_zero_and_below_floor_only_clear_enable() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x90], vec![0xFF]),
        I2cTrans::write(ADDR, vec![0x90, 0x7F]),
        I2cTrans::write_read(ADDR, vec![0x90], vec![0x3F]),
        I2cTrans::write(ADDR, vec![0x90, 0x3B]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    block_on(driver.set_ldo_mv_async(LdoChannel::Dldo1, 0)).unwrap();
    block_on(driver.set_ldo_mv_async(LdoChannel::Aldo3, 499)).unwrap();
    driver.free().done();
}

#[test]
fn set_ldo_async_above_max_touches_nothing() {
    let expectations: [I2cTrans; 0] = [];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    assert_eq!(
        block_on(driver.set_ldo_mv_async(LdoChannel::Bldo1, 3_600)),
        Err(Error::VoltageOutOfRange)
    );
    assert_eq!(
        block_on(driver.set_ldo_mv_async(LdoChannel::Dldo2, 1_450)),
        Err(Error::VoltageOutOfRange)
    );
    driver.free().done();
}

#[test]
fn get_ldo_async_disabled_and_enabled() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x90], vec![0xDF]),
        I2cTrans::write_read(ADDR, vec![0x91], vec![0x01]),
        I2cTrans::write_read(ADDR, vec![0x9A], vec![18]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    assert_eq!(block_on(driver.get_ldo_mv_async(LdoChannel::Bldo2)).unwrap(), 0);
    assert_eq!(block_on(driver.get_ldo_mv_async(LdoChannel::Dldo2)).unwrap(), 1_400);
    driver.free().done();
}

#[test]
fn power_key_async_press_is_reported_once() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x49], vec![0x0C]),
        I2cTrans::write(ADDR, vec![0x49, 0x0C]),
        I2cTrans::write_read(ADDR, vec![0x49], vec![0x00]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    assert_eq!(
        block_on(driver.power_key_was_pressed_async()).unwrap(),
        PowerKeyEvents { short_press: true, long_press: true }
    );
    assert_eq!(
        block_on(driver.power_key_was_pressed_async()).unwrap(),
        PowerKeyEvents::default()
    );
    driver.free().done();
}

#[test]
fn battery_status_async() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x00]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x08]),
        I2cTrans::write_read(ADDR, vec![0x01], vec![0b0100_0000]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    assert_eq!(block_on(driver.battery_status_async()).unwrap(), None);
    assert_eq!(
        block_on(driver.battery_status_async()).unwrap(),
        Some(BatteryStatus::Discharging)
    );
    driver.free().done();
}

#[test]
fn battery_telemetry_and_power_off_async() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x34], vec![0xFF, 0xAB]),
        I2cTrans::write_read(ADDR, vec![0xA4], vec![64]),
        I2cTrans::write_read(ADDR, vec![0x18], vec![0x0A]),
        I2cTrans::write(ADDR, vec![0x18, 0x08]),
        I2cTrans::write_read(ADDR, vec![0x18], vec![0x08]),
        I2cTrans::write_read(ADDR, vec![0x10], vec![0x30]),
        I2cTrans::write(ADDR, vec![0x10, 0x31]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Axp2101::new(mock);
    assert_eq!(block_on(driver.battery_voltage_mv_async()).unwrap(), 0x3FAB);
    assert_eq!(block_on(driver.battery_level_async()).unwrap(), 64);
    block_on(driver.set_battery_charging_enabled_async(false)).unwrap();
    assert!(!block_on(driver.battery_charging_enabled_async()).unwrap());
    block_on(driver.power_off_async()).unwrap();
    driver.free().done();
}
