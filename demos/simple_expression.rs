use fofx_rs::{Bindings, Evaluator, Value};

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::new("t*32/88 + 220").expect("Failed to compile");
    for t in [10.0, 88.0] {
        let bindings = Bindings::from([("t".to_string(), Value::Float(t))]);
        match evaluator.evaluate(&bindings) {
            Ok(result) => println!("{}", result),
            Err(err) => println!("Error: {}", err),
        }
    }

    let constant = Evaluator::new("881").expect("Failed to compile");
    let bindings = Bindings::from([("t".to_string(), Value::Float(44.0))]);
    match constant.evaluate(&bindings) {
        Ok(result) => println!("{}", result),
        Err(err) => println!("Error: {}", err),
    }
}
