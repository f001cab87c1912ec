use fofx_rs::{Bindings, Evaluator, Value};

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::new("cos(theta)*r").expect("Failed to compile");

    let batch: Vec<Bindings> = (0..8)
        .map(|step| {
            Bindings::from([
                ("r".to_string(), Value::Float(3.4)),
                (
                    "theta".to_string(),
                    Value::Float(step as f64 * std::f64::consts::FRAC_PI_4),
                ),
            ])
        })
        .collect();

    for (i, result) in evaluator.evaluate_batch(&batch).into_iter().enumerate() {
        match result {
            Ok(value) => println!("Result {}: {}", i, value),
            Err(err) => println!("Result {}: error: {}", i, err),
        }
    }

    let sandboxed = Evaluator::with_policy("sqrt(r)", false).expect("Failed to compile");
    match sandboxed.evaluate(&batch[0]) {
        Ok(value) => println!("Sandboxed: {}", value),
        Err(err) => println!("Sandboxed: error: {}", err),
    }
}
