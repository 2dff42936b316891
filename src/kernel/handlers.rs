//! Interrupt service routines. Together they are the process state machine.

use log::{debug, info};

use super::{Kernel, ProcessControlBlock, ProcessState};
use crate::error::{Fault, Result};
use crate::hardware::{Hardware, InterruptVector, Irq, IrqKind};

pub(super) fn install(interrupts: &mut InterruptVector<Kernel>) {
    interrupts.register(IrqKind::New, new);
    interrupts.register(IrqKind::Kill, kill);
    interrupts.register(IrqKind::IoIn, io_in);
    interrupts.register(IrqKind::IoOut, io_out);
    interrupts.register(IrqKind::Timeout, timeout);
    interrupts.register(IrqKind::Stat, stat);
}

fn mismatched(expected: IrqKind, irq: &Irq) -> Fault {
    Fault::invariant(format!("{} handler received {}", expected, irq.kind()))
}

fn new(kernel: &mut Kernel, hardware: &mut Hardware, irq: &Irq) -> Result<()> {
    let Irq::New { program, priority } = irq else {
        return Err(mismatched(IrqKind::New, irq));
    };

    let base_address = kernel.loader.load_program(program, &mut hardware.memory)?;
    let pid = kernel.pcb_table.new_pid();
    let mut pcb = ProcessControlBlock::new(pid, program.name(), base_address, *priority);
    pcb.set_state(ProcessState::Ready)?;
    kernel.pcb_table.add(pcb);

    match kernel.pcb_table.running_pid() {
        None => kernel.promote(pid, hardware)?,
        Some(running) if kernel.must_expropriate(running, pid)? => {
            kernel.expropriate(running, pid, hardware)?
        }
        Some(_) => kernel.make_ready(pid, hardware)?,
    }

    debug!("HARDWARE after load: {}", hardware);
    Ok(())
}

fn kill(kernel: &mut Kernel, hardware: &mut Hardware, _irq: &Irq) -> Result<()> {
    let pid = kernel.running_pid("#KILL")?;
    let pcb = kernel.pcb_table.get_mut(pid)?;
    kernel.dispatcher.save(pcb, hardware);
    pcb.set_state(ProcessState::Terminated)?;
    info!("Program Finished: {}", pcb);

    kernel.pcb_table.set_running(None);
    kernel.dispatch_next(hardware)
}

fn io_in(kernel: &mut Kernel, hardware: &mut Hardware, irq: &Irq) -> Result<()> {
    let Irq::IoIn(operation) = irq else {
        return Err(mismatched(IrqKind::IoIn, irq));
    };

    let pid = kernel.running_pid("#IO_IN")?;
    let pcb = kernel.pcb_table.get_mut(pid)?;
    kernel.dispatcher.save(pcb, hardware);
    pcb.set_state(ProcessState::Waiting)?;
    kernel.pcb_table.set_running(None);

    kernel
        .io_device_controller
        .run_operation(&mut hardware.io_device, pid, *operation)?;
    kernel.dispatch_next(hardware)?;

    debug!("{}", kernel.io_device_controller);
    Ok(())
}

fn io_out(kernel: &mut Kernel, hardware: &mut Hardware, _irq: &Irq) -> Result<()> {
    let pid = kernel
        .io_device_controller
        .get_finished_pcb(&mut hardware.io_device)?
        .ok_or_else(|| Fault::invariant("#IO_OUT with no operation in service"))?;

    match kernel.pcb_table.running_pid() {
        None => kernel.promote(pid, hardware)?,
        Some(running) if kernel.must_expropriate(running, pid)? => {
            kernel.expropriate(running, pid, hardware)?
        }
        Some(_) => kernel.make_ready(pid, hardware)?,
    }

    debug!("{}", kernel.io_device_controller);
    Ok(())
}

fn timeout(kernel: &mut Kernel, hardware: &mut Hardware, _irq: &Irq) -> Result<()> {
    if kernel.scheduler.is_empty() {
        return Ok(());
    }

    let running = kernel.running_pid("#TIMEOUT")?;
    if let Some(next) = kernel.scheduler.next_in_queue() {
        debug!("timeout - pid {} gives the CPU to pid {}", running, next.pid);
        kernel.expropriate(running, next.pid, hardware)?;
    }
    Ok(())
}

fn stat(kernel: &mut Kernel, hardware: &mut Hardware, _irq: &Irq) -> Result<()> {
    let now = hardware.clock.current_tick();
    kernel.scheduler.check_tick(now);
    kernel.diagnostics.record(now, &kernel.pcb_table);
    Ok(())
}
