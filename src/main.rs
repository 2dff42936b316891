use std::env;
use std::process::ExitCode;

use log::{error, info};

use os_scheduler_sim::io::{asm, gantt, Program};
use os_scheduler_sim::{logger, Config, Driver};

const LOG_ENV: &str = "OS_SIM_LOG";

fn sample_batch() -> Vec<(Program, u8)> {
    vec![
        (
            Program::from_blocks("prg1.exe", vec![asm::cpu(2), asm::io(), asm::cpu(3)]),
            3,
        ),
        (
            Program::from_blocks("prg2.exe", vec![asm::cpu(4), asm::io(), asm::cpu(1)]),
            1,
        ),
        (Program::from_blocks("prg3.exe", vec![asm::cpu(3)]), 2),
    ]
}

fn main() -> ExitCode {
    if let Err(err) = logger::init(logger::level_from_env(LOG_ENV)) {
        eprintln!("Failed to install logger: {}", err);
    }

    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            eprintln!("usage: os-scheduler-sim [fifo|priority|priority-preemptive|round-robin] [TICK_MS]");
            return ExitCode::FAILURE;
        }
    };

    info!("Starting the driver: {:?}", config);
    let mut driver = Driver::new(&config);
    if let Err(fault) = driver.execute_batch(sample_batch()) {
        error!("Batch aborted: {}", fault);
        return ExitCode::FAILURE;
    }

    let machine = driver.machine();
    let kernel = machine.kernel();
    println!("{}", gantt::render(kernel.diagnostics().history()));
    println!();

    println!("{:>4} | {:<10} | {:>8} | {:>4}", "pid", "program", "priority", "pc");
    for pcb in kernel.pcb_table().iter() {
        println!(
            "{:>4} | {:<10} | {:>8} | {:>4}",
            pcb.pid(),
            pcb.name(),
            pcb.priority(),
            pcb.program_counter
        );
    }

    ExitCode::SUCCESS
}
