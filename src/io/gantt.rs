use std::fmt::Write;

use crate::kernel::{Pid, ProcessState, TickRecord};

fn symbol(state: Option<ProcessState>) -> char {
    match state {
        Some(ProcessState::Running) => 'R',
        Some(ProcessState::Ready) => '.',
        Some(ProcessState::Waiting) => 'W',
        Some(ProcessState::Terminated) => 'T',
        Some(ProcessState::New) => 'N',
        None => ' ',
    }
}

/// Renders the recorded history as a Gantt chart: one row per process, one
/// column per tick.
pub fn render(history: &[TickRecord]) -> String {
    let mut pids: Vec<Pid> = history
        .iter()
        .flat_map(|record| record.states.iter().map(|(pid, _)| *pid))
        .collect();
    pids.sort_unstable();
    pids.dedup();

    let width = history
        .iter()
        .map(|record| record.tick.to_string().len())
        .max()
        .unwrap_or(1);

    let mut chart = String::from("pid |");
    for record in history {
        let _ = write!(chart, " {:>width$}", record.tick);
    }
    chart.push('\n');
    chart.push_str(&"-".repeat(5 + history.len() * (width + 1)));

    for pid in pids {
        let _ = write!(chart, "\n{:>3} |", pid);
        for record in history {
            let _ = write!(chart, " {:>width$}", symbol(record.state_of(pid)));
        }
    }

    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gantt_render() {
        let history = vec![
            TickRecord {
                tick: 0,
                states: vec![(1, ProcessState::Running)],
            },
            TickRecord {
                tick: 1,
                states: vec![(1, ProcessState::Waiting), (2, ProcessState::Running)],
            },
            TickRecord {
                tick: 2,
                states: vec![(1, ProcessState::Ready), (2, ProcessState::Terminated)],
            },
        ];

        let chart = render(&history);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], "pid | 0 1 2");
        assert_eq!(lines[2], "  1 | R W .");
        assert_eq!(lines[3], "  2 |   R T");
    }

    #[test]
    fn test_gantt_render_empty_history() {
        assert_eq!(render(&[]).lines().next(), Some("pid |"));
    }
}
