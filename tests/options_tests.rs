mod common;
use common::*;

use clap::error::ErrorKind;
use max40080_lib::{AdcSampleRate, DigitalFilter};
use max40080_util::options::{Board, SampleCount, Variable};

const HEX_DIGITS: &str = "0123456789abcdefABCDEF";

#[test]
fn every_two_digit_hex_address_parses() {
    for high in HEX_DIGITS.chars() {
        for low in HEX_DIGITS.chars() {
            let arg = format!("{}{}", high, low);
            let expected = high.to_digit(16).unwrap() * 16 + low.to_digit(16).unwrap();
            let options = options(&["--i2c-address", &arg]).unwrap();
            assert_eq!(u32::from(options.i2c_address()), expected, "address {}", arg);
        }
    }
}

#[test]
fn malformed_addresses_are_rejected() {
    for arg in ["1", "123", "0x21", "g0", "2z", "+1", "  "] {
        let err = options(&["-a", arg]).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidI2cAddress(_)),
            "{} gave {:?}",
            arg,
            err
        );
    }
}

#[test]
fn board_presets() {
    let click = options(&["--board", "mikroe-current-6-click"]).unwrap();
    assert_eq!(click.board(), Some(Board::MikroeCurrent6Click));
    assert_eq!(click.i2c_address(), 0x21);
    assert_eq!(click.shunt_resistor(), 0.010);

    let evsys = options(&["-b", "MAX40080EVSYS"]).unwrap();
    assert_eq!(evsys.i2c_address(), 0x21);
    assert_eq!(evsys.shunt_resistor(), 0.050);

    let err = options(&["-b", "max40080evsys"]).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownBoard(_)));
}

#[test]
fn board_excludes_address_in_either_order() {
    for args in [["-b", "MAX40080EVSYS", "-a", "40"], ["-a", "40", "-b", "MAX40080EVSYS"]] {
        let err = options(&args).unwrap_err();
        assert!(matches!(err, ValidationError::BoardWithI2cAddress), "{:?} gave {:?}", args, err);
    }
}

#[test]
fn board_excludes_shunt_in_either_order() {
    for args in [
        ["-b", "mikroe-current-6-click", "-r", "0.1"],
        ["-r", "0.1", "-b", "mikroe-current-6-click"],
    ] {
        let err = options(&args).unwrap_err();
        assert!(matches!(err, ValidationError::BoardWithShunt), "{:?} gave {:?}", args, err);
    }
}

#[test]
fn defaults_without_flags() {
    let options = options(&[]).unwrap();
    assert_eq!(options.i2c_controller(), 1);
    assert_eq!(options.i2c_address(), 0x21);
    assert_eq!(options.shunt_resistor(), 0.010);
    assert_eq!(options.variable(), None);
    assert_eq!(options.sample_rate(), None);
    assert_eq!(options.averaging(), None);
    assert_eq!(options.count(), SampleCount::Limited(1));
    assert!(!options.raw_output());
    assert!(options.log_file().is_none());
}

#[test]
fn explicit_values_are_kept() {
    let options = options(&[
        "--i2c-controler",
        "3",
        "--i2c-address",
        "4A",
        "--shunt",
        "0.1",
        "--variable",
        "voltage",
        "--raw",
        "--log-file",
        "run.log",
    ])
    .unwrap();
    assert_eq!(options.i2c_controller(), 3);
    assert_eq!(options.i2c_address(), 0x4A);
    assert_eq!(options.shunt_resistor(), 0.1);
    assert_eq!(options.variable(), Some(Variable::Voltage));
    assert!(options.raw_output());
    assert_eq!(options.log_file(), Some(std::path::Path::new("run.log")));
}

#[test]
fn controller_accepts_corrected_spelling() {
    assert_eq!(options(&["--i2c-controller", "7"]).unwrap().i2c_controller(), 7);
    assert!(matches!(
        options(&["--i2c-controler=-1"]).unwrap_err(),
        ValidationError::InvalidI2cController(_)
    ));
}

#[test]
fn variables() {
    assert_eq!(options(&["-v", "current"]).unwrap().variable(), Some(Variable::Current));
    assert_eq!(options(&["-v", "both"]).unwrap().variable(), Some(Variable::Both));
    assert!(matches!(
        options(&["-v", "Current"]).unwrap_err(),
        ValidationError::InvalidVariable(_)
    ));
}

#[test]
fn both_only_allows_half_khz_in_either_order() {
    for args in [["--sample-rate", "0.5", "--variable", "both"], ["--variable", "both", "--sample-rate", "0.5"]] {
        assert_eq!(options(&args).unwrap().sample_rate(), Some(AdcSampleRate::Ksps0_5Both));
    }

    for args in [["--sample-rate", "15", "--variable", "both"], ["--variable", "both", "--sample-rate", "15"]] {
        assert!(matches!(options(&args).unwrap_err(), ValidationError::SampleRateWithBoth));
    }
}

#[test]
fn sample_rate_matches_within_tolerance() {
    for arg in ["93.5", "93.49", "93.51"] {
        assert_eq!(options(&["-s", arg]).unwrap().sample_rate(), Some(AdcSampleRate::Ksps93_5), "{}", arg);
    }
    assert!(matches!(
        options(&["-s", "93.52"]).unwrap_err(),
        ValidationError::UnsupportedSampleRate(_)
    ));
    assert!(matches!(
        options(&["-s", "fast"]).unwrap_err(),
        ValidationError::InvalidSampleRate(_)
    ));
}

#[test]
fn averaging_values() {
    assert_eq!(options(&["-f", "32"]).unwrap().averaging(), Some(DigitalFilter::Average32));
    assert_eq!(u8::from(DigitalFilter::Average32), 3);
    assert!(matches!(
        options(&["-f", "3"]).unwrap_err(),
        ValidationError::UnsupportedAveraging(_)
    ));
    assert!(matches!(
        options(&["-f", "eight"]).unwrap_err(),
        ValidationError::InvalidAveraging(_)
    ));
}

#[test]
fn count_values() {
    assert_eq!(options(&["-n", "5"]).unwrap().count(), SampleCount::Limited(5));
    assert_eq!(options(&["--count", "-1"]).unwrap().count(), SampleCount::Unbounded);
    for arg in ["0", "-2", "many"] {
        assert!(
            matches!(options(&["-n", arg]).unwrap_err(), ValidationError::InvalidCount(_)),
            "{}",
            arg
        );
    }
}

#[test]
fn unknown_flags_and_missing_values_come_from_clap() {
    let err = options(&["--frobnicate"]).unwrap_err();
    assert!(matches!(err, ValidationError::Cli(_)));
    assert!(err.into_clap_error().use_stderr());

    let err = options(&["--count"]).unwrap_err();
    assert!(matches!(err, ValidationError::Cli(_)));
}

#[test]
fn help_is_not_an_error_exit() {
    let err = options(&["--help"]).unwrap_err().into_clap_error();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    assert!(!err.use_stderr());
}

#[test]
fn validation_error_is_reported_with_usage() {
    let rendered = options(&["-v", "power"]).unwrap_err().into_clap_error().to_string();
    assert!(rendered.contains("Invalid variable value 'power'"));
    assert!(rendered.contains("Usage:"));
}
