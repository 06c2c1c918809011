//! End-to-end tests of the public engine entry points

use ucal::{codes, Engine, EngineConfig, Quantity, UcalError};

fn engine() -> Engine {
    Engine::new().expect("unit registry should build")
}

fn eval(text: &str) -> String {
    engine()
        .interpret(text)
        .unwrap_or_else(|e| panic!("{:?} failed: {}", text, e))
}

fn eval_err(text: &str) -> UcalError {
    match engine().interpret(text) {
        Ok(result) => panic!("{:?} should fail, got {:?}", text, result),
        Err(e) => e,
    }
}

fn assert_parser_error(text: &str) {
    let err = eval_err(text);
    assert!(err.is_parser(), "{:?} gave {:?}", text, err);
}

fn assert_quantity_error(text: &str) {
    let err = eval_err(text);
    assert!(err.is_quantity(), "{:?} gave {:?}", text, err);
}

#[test]
fn test_malformed_input_is_parser_error() {
    for text in ["", "+++1", "--1", "+", ".", "e10", "1ee10", "1E+-1", "%1", "0x", "0xAG", "0b"] {
        assert_parser_error(text);
    }
}

#[test]
fn test_number_literals() {
    assert_eq!(eval("001"), "1");
    assert_eq!(eval(".1"), "0.1");
    assert_eq!(eval("+1"), "1");
    assert_eq!(eval("-1"), "-1");
    assert_eq!(eval("1e3"), "1000");
    assert_eq!(eval("1+-2"), "-1");
    assert_eq!(eval("0.1234567890"), "0.123456789");
    assert_eq!(eval("+1e+9"), "1000000000");
    assert_eq!(eval("-1e-3"), "-0.001");
    assert_eq!(eval("+1e555"), "1e555");
    assert_eq!(eval("1e-67"), "1e-67");
}

#[test]
fn test_radix_literals() {
    assert_eq!(eval("0b11"), "3");
    assert_eq!(eval("0xAbCdEf"), "11259375");
    assert_eq!(eval("0x10 + 0b10"), "18");
}

#[test]
fn test_radix_output() {
    assert_eq!(eval("123 in hex"), "0x7B");
    assert_eq!(eval("67 in hex"), "0x43");
    assert_eq!(eval("67 in bin"), "0b1000011");
    assert_eq!(eval("67 as BINARY"), "0b1000011");
    assert!(eval("1m in hex").contains("only integers"));
    assert_eq!(eval("1.5 to binary"), "only integers can be written as binary");
}

#[test]
fn test_parentheses() {
    assert_eq!(eval("(((1)))"), "1");
    for text in ["1)", "(1", "(1))", "((1)", ")1("] {
        let err = eval_err(text);
        assert_eq!(err.code, codes::UNBALANCED_PARENS, "{:?}", text);
    }
}

#[test]
fn test_implicit_multiplication() {
    assert_eq!(eval("1 m"), "1 m");
    assert_eq!(eval("m m"), "1 m^2");
    assert_eq!(eval("(1)(1)"), "1");
    assert_eq!(eval("(2 + 1) ft to in"), "36 in");
    assert_parser_error("1 2");
    assert_parser_error("m 1");
    assert_parser_error("1 m 1");
}

#[test]
fn test_units_combine() {
    assert_eq!(eval("1A*Ohm"), "1 V");
    assert_eq!(eval("1/s"), "1 Hz");
    assert_eq!(eval("1/m"), "1 m^-1");
    assert_eq!(eval("m^2"), "1 m^2");
    assert_eq!(eval("m^1.5"), "1 m^1.5");
    assert_eq!(eval("5V * 500mA"), "2.5 W");
    assert_eq!(eval("1mi + 10km"), "11609.344 m");
}

#[test]
fn test_inconsistent_units() {
    assert_quantity_error("1 m + 1 kg");
    assert_quantity_error("1 s - 1");
    assert_quantity_error("(1m) % 2");
    assert_quantity_error("1 ^ (1m)");
}

#[test]
fn test_conversion_words() {
    assert_eq!(eval("1m to mm"), "1000 mm");
    assert_eq!(eval("1m as mm"), "1000 mm");
    assert_eq!(eval("1m in mm"), "1000 mm");
    assert_eq!(eval("1in^2 to mm^2"), "645.16 mm^2");
    assert_eq!(eval("sqrt(2*g*30ft) in fps"), "43.93680590786985 fps");
}

#[test]
fn test_to_and_as_do_not_fall_back() {
    let err = eval_err("1 m to kg");
    assert_eq!(err.code, codes::INCONSISTENT_UNITS);
    assert_parser_error("1 m as furlong");
}

#[test]
fn test_in_falls_back_to_inch() {
    assert_eq!(eval("1 in kg"), "0.0254 kg m");
    assert_eq!(eval("3 in + 1 in"), "0.1016 m");
}

#[test]
fn test_factorial() {
    assert_eq!(eval("18!"), "6402373705728000");
    assert_eq!(eval("0!"), "1");
    assert_eq!(eval("3^2!"), "9");
    assert_eq!(eval("3!^2"), "36");
    assert_eq!(eval("(3!)^2"), "36");
    for text in ["(1m)!", "1.5!", "(-1)!"] {
        assert_quantity_error(text);
    }
}

#[test]
fn test_percent() {
    assert_eq!(eval("100%"), "1");
    assert_eq!(eval("50%"), "0.5");
    assert_eq!(eval("25%"), "0.25");
    assert_eq!(eval("(50%)"), "0.5");
}

#[test]
fn test_percent_disabled() {
    let mut engine = Engine::with_config(EngineConfig::new().with_percent(false)).unwrap();
    assert!(engine.interpret("50%").unwrap_err().is_parser());
    assert_eq!(engine.interpret("7 % 4").unwrap(), "3");
}

#[test]
fn test_modulo() {
    assert_eq!(eval("1 % 7"), "1");
    assert_eq!(eval("7 % 1"), "0");
    assert_eq!(eval("4 % 2.5"), "1.5");
    assert_eq!(eval("1e40 % 3"), "1");
    assert_eq!(eval("10^40 % 7"), "4");
}

#[test]
fn test_powers() {
    assert_eq!(eval("2 ^ 5"), "32");
    assert_eq!(eval("3^3^3"), "7625597484987");
    assert_eq!(eval("2^-1"), "0.5");
    assert_eq!(eval("4^0.5"), "2");
}

#[test]
fn test_functions() {
    assert_eq!(eval("sqrt(4)"), "2");
    assert_eq!(eval("sqrt(4 m^2)"), "2 m");
    assert_eq!(eval("exp(0)"), "1");
    assert_eq!(eval("abs(1 m)"), "1 m");
    assert_eq!(eval("abs(-2 s)"), "2 s");
    assert_eq!(eval("ln(exp(1))"), "1");
    assert_eq!(eval("log10(100)"), "2");
    for text in ["exp(1m)", "ln(1m)", "log(1m)", "log10(1m)"] {
        assert_quantity_error(text);
    }
    assert_quantity_error("sqrt(-1)");
    assert_quantity_error("ln(0)");
}

#[test]
fn test_out_of_range_results_are_errors() {
    for text in ["exp(1e30)", "2^(1e30)", "10^(2^62)"] {
        let err = eval_err(text);
        assert!(err.is_quantity(), "{:?} gave {:?}", text, err);
        assert_eq!(err.code, codes::OVERFLOW, "{:?}", text);
    }
    assert_eq!(eval("0.5^(1e30)"), "0");
    assert_eq!(eval("exp(-1e30)"), "0");
}

#[test]
fn test_unknown_function() {
    let err = eval_err("thisIsUnrecognized(1)");
    assert!(err.is_parser());
    assert_eq!(err.code, codes::UNDEFINED_FUNC);
}

#[test]
fn test_division_by_zero() {
    let err = eval_err("1 m / 0");
    assert!(err.is_quantity());
    assert_eq!(err.code, codes::DIV_ZERO);
}

#[test]
fn test_add_then_subtract_round_trips() {
    let pairs = [("3.7 m", "2 ft"), ("1 lb", "3 oz"), ("2 hour", "15 min"), ("1 atm", "1 psi")];
    let mut engine = engine();
    for (a, b) in pairs {
        let direct = engine.evaluate(a).unwrap();
        let round_trip = engine.evaluate(&format!("({} + {}) - {}", a, b, b)).unwrap();
        assert_eq!(direct, round_trip, "{} and {}", a, b);
    }
}

#[test]
fn test_every_unit_round_trips() {
    let mut engine = engine();
    let names: Vec<String> = engine.registry().names().into_iter().map(String::from).collect();
    for name in names {
        let result = engine.interpret(&format!("1 {} to {}", name, name)).unwrap();
        assert_eq!(result, format!("1 {}", name));
        let result = engine.interpret(&format!("1 {} in {}", name, name)).unwrap();
        assert_eq!(result, format!("1 {}", name));
    }
}

#[test]
fn test_sum_then_difference_over_registry() {
    let mut engine = engine();
    let units: Vec<(String, Quantity)> = engine
        .registry()
        .names()
        .into_iter()
        .filter_map(|name| engine.registry().get(name).map(|q| (name.to_string(), q.clone())))
        .collect();

    let mut checked = 0;
    for (i, (a, qa)) in units.iter().enumerate() {
        let partner = units[i + 1..].iter().find(|(_, qb)| {
            let ratio = match (qa.value.to_f64(), qb.value.to_f64()) {
                (Some(x), Some(y)) if y != 0.0 => (x / y).abs(),
                _ => return false,
            };
            qb.dimension == qa.dimension && (1e-6..=1e6).contains(&ratio)
        });
        if let Some((b, _)) = partner {
            let direct = engine.evaluate(&format!("1 {}", a)).unwrap();
            let round_trip = engine.evaluate(&format!("(1 {} + 1 {}) - 1 {}", a, b, b)).unwrap();
            assert_eq!(direct, round_trip, "{} and {}", a, b);
            checked += 1;
        }
    }
    assert!(checked > 30, "only {} unit pairs compared", checked);
}

#[test]
fn test_answer() {
    let mut engine = engine();
    assert_eq!(engine.interpret("Ans").unwrap_err().code, codes::UNDEFINED_VAR);

    engine.interpret("2 m").unwrap();
    assert_eq!(engine.interpret("Ans * 3").unwrap(), "6 m");
    engine.interpret("Ans to mm").unwrap();
    assert_eq!(engine.interpret("Ans").unwrap(), "6 m");
    engine.interpret("67 in hex").unwrap();
    assert_eq!(engine.interpret("Ans + 1").unwrap(), "68");
}

#[test]
fn test_failed_evaluation_keeps_answer() {
    let mut engine = engine();
    engine.evaluate("5 kg").unwrap();
    assert!(engine.evaluate("1 m + 1 s").is_err());
    assert_eq!(engine.evaluate("Ans").unwrap(), "5 kg");
}

#[test]
fn test_evaluate_in() {
    let mut engine = engine();
    assert_eq!(engine.evaluate_in("5km + 1mi", "mi").unwrap(), "4.10685596118667 mi");
    assert_eq!(engine.evaluate_in("1 hour", "s").unwrap(), "3600 s");
    let err = engine.evaluate_in("1 m", "kg").unwrap_err();
    assert!(err.is_quantity());
}

#[test]
fn test_include_measure() {
    let mut engine = Engine::with_config(EngineConfig::new().with_measure(true)).unwrap();
    assert_eq!(engine.interpret("1 m").unwrap(), "1 m [length]");
    assert_eq!(engine.interpret("1 km to mi").unwrap(), "0.621371192237334 mi [length]");
    assert_eq!(engine.interpret("1 kg m").unwrap(), "1 kg m");
}

#[test]
fn test_output_precision() {
    let mut engine = Engine::with_config(EngineConfig::new().with_output_precision(6)).unwrap();
    assert_eq!(engine.interpret("1/3").unwrap(), "0.333333");
    assert_eq!(engine.interpret("2/3").unwrap(), "0.666667");
}

#[test]
fn test_working_precision_reaches_factorial() {
    let config = EngineConfig::new().with_precision(60).with_output_precision(60);
    let mut engine = Engine::with_config(config).unwrap();
    assert_eq!(
        engine.interpret("40!").unwrap(),
        "815915283247897734345611269596115894272000000000"
    );
}
