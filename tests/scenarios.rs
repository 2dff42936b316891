use std::time::Duration;

use os_scheduler_sim::io::{asm, gantt, Program};
use os_scheduler_sim::kernel::{Pid, ProcessState, SchedulingAlgorithm};
use os_scheduler_sim::{Config, Driver, Fault, Machine};

fn machine(algorithm: SchedulingAlgorithm) -> Machine {
    Machine::new(&Config::with_algorithm(algorithm))
}

fn state(machine: &Machine, pid: Pid) -> ProcessState {
    machine.kernel().pcb_table().get(pid).unwrap().state()
}

fn ready_pids(machine: &Machine) -> Vec<Pid> {
    machine.kernel().scheduler().ready().iter().map(|entry| entry.pid).collect()
}

fn running_at(machine: &Machine, tick: u64) -> Option<Pid> {
    machine
        .kernel()
        .diagnostics()
        .history()
        .iter()
        .find(|record| record.tick == tick)
        .and_then(|record| {
            record
                .states
                .iter()
                .find(|(_, state)| *state == ProcessState::Running)
                .map(|(pid, _)| *pid)
        })
}

#[test]
fn test_single_program_with_io() {
    let mut machine = machine(SchedulingAlgorithm::Fifo);
    assert!(!machine.hardware().cpu.is_busy());

    let program = Program::from_blocks("prg1.exe", vec![asm::cpu(2), asm::io(), asm::cpu(3)]);
    machine.run(program, 1).unwrap();

    machine.do_ticks(2).unwrap();
    assert_eq!(state(&machine, 1), ProcessState::Running);

    // The IO instruction blocks the process and leaves the CPU idle.
    machine.tick().unwrap();
    assert_eq!(state(&machine, 1), ProcessState::Waiting);
    assert!(!machine.hardware().cpu.is_busy());
    assert!(machine.hardware().io_device.is_busy());
    assert_eq!(machine.kernel().pcb_table().running_pid(), None);

    machine.do_ticks(2).unwrap();
    assert_eq!(state(&machine, 1), ProcessState::Waiting);

    // The device finishes and the process goes straight back to the CPU.
    machine.tick().unwrap();
    assert_eq!(state(&machine, 1), ProcessState::Running);
    assert_eq!(machine.hardware().cpu.pc(), Some(3));
    assert!(machine.hardware().io_device.is_idle());

    machine.do_ticks(3).unwrap();
    assert_eq!(state(&machine, 1), ProcessState::Running);

    machine.tick().unwrap();
    assert_eq!(state(&machine, 1), ProcessState::Terminated);
    assert!(machine.kernel().all_terminated());
    assert!(!machine.hardware().cpu.is_busy());
    assert_eq!(machine.kernel().pcb_table().get(1).unwrap().program_counter, 7);

    let chart = gantt::render(machine.kernel().diagnostics().history());
    assert_eq!(chart.lines().nth(2), Some("  1 | R R R W W W R R R R"));
}

#[test]
fn test_fifo_keeps_arrival_order() {
    let mut machine = machine(SchedulingAlgorithm::Fifo);
    machine.run(Program::from_blocks("prg1.exe", vec![asm::cpu(2)]), 1).unwrap();
    machine.run(Program::from_blocks("prg2.exe", vec![asm::cpu(2)]), 1).unwrap();
    machine.run(Program::from_blocks("prg3.exe", vec![asm::cpu(2)]), 1).unwrap();

    assert_eq!(machine.kernel().pcb_table().running_pid(), Some(1));
    assert_eq!(state(&machine, 2), ProcessState::Ready);
    assert_eq!(state(&machine, 3), ProcessState::Ready);
    assert_eq!(ready_pids(&machine), vec![2, 3]);

    machine.do_ticks(2).unwrap();
    assert_eq!(ready_pids(&machine), vec![2, 3]);

    // prg1 reaches its EXIT.
    machine.tick().unwrap();
    assert_eq!(state(&machine, 1), ProcessState::Terminated);
    assert_eq!(machine.kernel().pcb_table().running_pid(), Some(2));
    assert_eq!(ready_pids(&machine), vec![3]);
    assert_eq!(machine.hardware().mmu.base_address(), 3);
}

#[test]
fn test_address_fault_at_limit() {
    let config = Config {
        mmu_limit: 2,
        ..Config::default()
    };
    let mut machine = Machine::new(&config);
    machine.run(Program::from_blocks("long.exe", vec![asm::cpu(5)]), 1).unwrap();

    machine.do_ticks(3).unwrap();
    assert_eq!(
        machine.tick(),
        Err(Fault::AddressFault { logical: 3, limit: 2 })
    );
}

#[test]
fn test_round_robin_quantum() {
    let mut machine = machine(SchedulingAlgorithm::RoundRobin);
    machine.run(Program::from_blocks("a.exe", vec![asm::cpu(10)]), 1).unwrap();
    machine.run(Program::from_blocks("b.exe", vec![asm::cpu(10)]), 1).unwrap();

    machine.do_ticks(3).unwrap();
    assert_eq!(machine.kernel().pcb_table().running_pid(), Some(1));
    assert_eq!(machine.hardware().timer.tick_count(), 3);

    machine.tick().unwrap();
    assert_eq!(machine.kernel().pcb_table().running_pid(), Some(2));
    assert_eq!(state(&machine, 1), ProcessState::Ready);
    assert_eq!(machine.hardware().timer.tick_count(), 1);

    machine.do_ticks(8).unwrap();
    for tick in 0..12 {
        let expected = if (tick / 3) % 2 == 0 { 1 } else { 2 };
        assert_eq!(running_at(&machine, tick), Some(expected), "tick {}", tick);
    }
}

#[test]
fn test_round_robin_alone_is_never_preempted() {
    let mut machine = machine(SchedulingAlgorithm::RoundRobin);
    machine.run(Program::from_blocks("a.exe", vec![asm::cpu(6)]), 1).unwrap();

    machine.do_ticks(7).unwrap();
    assert!(machine.kernel().all_terminated());
    for tick in 0..7 {
        assert_eq!(running_at(&machine, tick), Some(1));
    }
}

#[test]
fn test_preemptive_priority_on_arrival() {
    let mut machine = machine(SchedulingAlgorithm::PriorityPreemptive);
    machine.run(Program::from_blocks("low.exe", vec![asm::cpu(5)]), 3).unwrap();
    machine.do_ticks(2).unwrap();

    machine.run(Program::from_blocks("high.exe", vec![asm::cpu(2)]), 1).unwrap();
    assert_eq!(machine.kernel().pcb_table().running_pid(), Some(2));
    assert_eq!(state(&machine, 1), ProcessState::Ready);
    assert_eq!(machine.kernel().pcb_table().get(1).unwrap().program_counter, 2);

    // Same priority never preempts.
    machine.run(Program::from_blocks("peer.exe", vec![asm::cpu(1)]), 1).unwrap();
    assert_eq!(machine.kernel().pcb_table().running_pid(), Some(2));
    assert_eq!(ready_pids(&machine), vec![3, 1]);
}

#[test]
fn test_non_preemptive_priority_waits() {
    let mut machine = machine(SchedulingAlgorithm::Priority);
    machine.run(Program::from_blocks("low.exe", vec![asm::cpu(2)]), 3).unwrap();
    machine.run(Program::from_blocks("mid.exe", vec![asm::cpu(2)]), 2).unwrap();
    machine.run(Program::from_blocks("high.exe", vec![asm::cpu(2)]), 1).unwrap();

    assert_eq!(machine.kernel().pcb_table().running_pid(), Some(1));
    assert_eq!(ready_pids(&machine), vec![3, 2]);

    machine.do_ticks(3).unwrap();
    assert_eq!(machine.kernel().pcb_table().running_pid(), Some(3));
}

#[test]
fn test_priority_aging_climbs_one_level_per_pass() {
    let mut machine = machine(SchedulingAlgorithm::Priority);
    machine.run(Program::from_blocks("busy.exe", vec![asm::cpu(30)]), 1).unwrap();
    machine.run(Program::from_blocks("starved.exe", vec![asm::cpu(1)]), 5).unwrap();

    let priority_of_starved = |machine: &Machine| machine.kernel().scheduler().ready()[0].priority;

    machine.do_ticks(7).unwrap();
    assert_eq!(priority_of_starved(&machine), 5);

    for expected in [4, 3, 2, 1] {
        machine.tick().unwrap();
        assert_eq!(priority_of_starved(&machine), expected);
        machine.do_ticks(3).unwrap();
        assert_eq!(priority_of_starved(&machine), expected);
    }

    // Static priority is untouched.
    assert_eq!(machine.kernel().pcb_table().get(2).unwrap().priority(), 5);
}

#[test]
fn test_io_requests_are_served_in_order() {
    let mut machine = machine(SchedulingAlgorithm::Fifo);
    machine.run(Program::from_blocks("a.exe", vec![asm::io(), asm::cpu(1)]), 1).unwrap();
    machine.run(Program::from_blocks("b.exe", vec![asm::io(), asm::cpu(1)]), 1).unwrap();

    machine.do_ticks(2).unwrap();
    let controller = machine.kernel().io_device_controller();
    assert_eq!(controller.in_service(), Some(1));
    assert_eq!(controller.waiting().collect::<Vec<_>>(), vec![2]);
    assert_eq!(state(&machine, 2), ProcessState::Waiting);

    machine.do_ticks(30).unwrap();
    assert!(machine.kernel().all_terminated());
}

#[test]
fn test_one_running_process_every_tick() {
    for algorithm in [
        SchedulingAlgorithm::Fifo,
        SchedulingAlgorithm::Priority,
        SchedulingAlgorithm::PriorityPreemptive,
        SchedulingAlgorithm::RoundRobin,
    ] {
        let mut machine = machine(algorithm);
        machine
            .run(Program::from_blocks("prg1.exe", vec![asm::cpu(2), asm::io(), asm::cpu(3)]), 3)
            .unwrap();
        machine
            .run(Program::from_blocks("prg2.exe", vec![asm::cpu(4), asm::io(), asm::cpu(1)]), 1)
            .unwrap();
        machine.run(Program::from_blocks("prg3.exe", vec![asm::cpu(3)]), 2).unwrap();

        let mut ticks = 0;
        while !machine.kernel().all_terminated() {
            machine.tick().unwrap();
            machine.kernel().pcb_table().verify().unwrap();
            ticks += 1;
            assert!(ticks < 100, "{} never finished", algorithm);
        }

        for record in machine.kernel().diagnostics().history() {
            let running = record
                .states
                .iter()
                .filter(|(_, state)| *state == ProcessState::Running)
                .count();
            assert!(running <= 1, "{} tick {}", algorithm, record.tick);
        }
    }
}

#[test]
fn test_driver_runs_batch_on_clock_thread() {
    let config = Config {
        tick_interval: Duration::from_millis(1),
        ..Config::with_algorithm(SchedulingAlgorithm::RoundRobin)
    };
    let mut driver = Driver::new(&config);
    let batch = vec![
        (Program::from_blocks("prg1.exe", vec![asm::cpu(2), asm::io(), asm::cpu(3)]), 3),
        (Program::from_blocks("prg2.exe", vec![asm::cpu(4), asm::io(), asm::cpu(1)]), 1),
        (Program::from_blocks("prg3.exe", vec![asm::cpu(3)]), 2),
    ];

    driver.execute_batch(batch).unwrap();

    assert!(!driver.is_running());
    let machine = driver.machine();
    assert!(machine.kernel().all_terminated());
    assert_eq!(machine.kernel().pcb_table().len(), 3);
}
