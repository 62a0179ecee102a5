//! CLI result presenter.

use std::time::Duration;

use chudpi_core::calculator::PiResult;
use chudpi_orchestration::interfaces::{CalculationResult, ResultPresenter};

use crate::output::{format_digits, format_duration, format_number};
use crate::ui::{print_error, print_field, print_header};

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
    show_value: bool,
}

impl CLIResultPresenter {
    /// `show_value` prints the digits after the report; quiet mode prints
    /// only the digits.
    #[must_use]
    pub fn new(verbose: bool, quiet: bool, show_value: bool) -> Self {
        Self {
            verbose,
            quiet,
            show_value,
        }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, algorithm: &str, result: &PiResult, duration: Duration, details: bool) {
        if self.quiet {
            println!("{}", result.value);
            return;
        }

        print_header(algorithm);
        print_field("Digits:", &format_number(result.digits));
        print_field("Terms:", &format_number(result.terms));
        print_field("Depth:", &result.depth.to_string());
        print_field("Threads:", &result.threads.to_string());
        print_field("Series:", &format_duration(result.series_time));
        print_field("Finish:", &format_duration(result.finish_time));
        print_field("Total:", &format_duration(duration));

        if details {
            print_field("Precision:", &format!("{} bits", format_number(result.precision_bits)));
            print_field("P size:", &format!("{} digits", format_number(result.p_digits)));
            print_field("Q size:", &format!("{} digits", format_number(result.q_digits)));
        }

        if self.show_value {
            if details {
                println!("pi(0,{})=", result.terms);
                println!("{}", format_digits(&result.value, self.verbose));
            } else {
                println!("pi = {}", format_digits(&result.value, self.verbose));
            }
        }
    }

    fn present_comparison(&self, results: &[CalculationResult]) {
        if self.quiet {
            return;
        }

        println!("\nComparison Results:");
        println!("{:-<60}", "");
        for result in results {
            let status = if result.outcome.is_err() {
                "ERROR"
            } else {
                "OK"
            };
            println!(
                "  {:<20} {:>10} [{}]",
                result.algorithm,
                format_duration(result.duration),
                status,
            );
        }
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}
