//! Lifecycle tests for the counter and timer agents.
//!
//! Tests cover:
//! - Stop and step commands issued from other threads
//! - The counter stopping when its display goes away
//! - A timer driving the stop command
//! - Controls ignoring commands after stop

use anyhow::{anyhow, Result};
use counter_agent::{AgentConfig, Controls, CounterAgent, TimerAgent};
use crossbeam_channel::{unbounded, Receiver};
use std::thread;
use std::time::{Duration, Instant};

fn fast_config() -> AgentConfig {
    AgentConfig::builder()
        .tick(Duration::from_millis(2))
        .thread_name("test-counter")
        .build()
}

fn next_value(rx: &Receiver<i64>) -> Result<i64> {
    rx.recv_timeout(Duration::from_secs(5))
        .map_err(|e| anyhow!("no value from counter: {}", e))
}

#[test]
fn test_stop_from_another_thread() -> Result<()> {
    let (tx, rx) = unbounded();
    let agent = CounterAgent::spawn(fast_config(), tx)?;
    let handle = agent.handle();

    next_value(&rx)?;
    thread::spawn(move || handle.stop_counting()).join().unwrap();

    let last = agent.join()?;
    let published: Vec<i64> = rx.iter().collect();
    assert!(published.iter().all(|&v| v < last));
    Ok(())
}

#[test]
fn test_step_change_is_observed() -> Result<()> {
    let (tx, rx) = unbounded();
    let agent = CounterAgent::spawn(fast_config(), tx)?;
    for _ in 0..3 {
        next_value(&rx)?;
    }

    agent.set_step(-1);

    // Within a few ticks the counter must start going down.
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut previous = next_value(&rx)?;
    loop {
        let current = next_value(&rx)?;
        if current < previous {
            break;
        }
        assert!(Instant::now() < deadline, "step change never observed");
        previous = current;
    }

    agent.stop_counting();
    agent.join()?;
    Ok(())
}

#[test]
fn test_dropping_the_display_ends_the_loop() -> Result<()> {
    let (tx, rx) = unbounded();
    let agent = CounterAgent::spawn(fast_config(), tx)?;
    next_value(&rx)?;
    drop(rx);

    // No stop command: the failed send alone ends the loop.
    agent.join()?;
    Ok(())
}

#[test]
fn test_timer_stops_the_counter() -> Result<()> {
    let (tx, rx) = unbounded();
    let agent = CounterAgent::spawn(fast_config(), tx)?;
    let controls = Controls::new(agent.handle());

    let timer_controls = controls.clone();
    let started = Instant::now();
    let timer = TimerAgent::start(Duration::from_millis(40), move || timer_controls.stop())?;

    let values: Vec<i64> = rx.iter().collect();
    timer.join()?;
    agent.join()?;

    assert!(started.elapsed() >= Duration::from_millis(40));
    assert!(!values.is_empty());
    assert!(!controls.is_enabled());
    Ok(())
}

#[test]
fn test_controls_ignore_commands_after_stop() -> Result<()> {
    let (tx, _rx) = unbounded();
    let agent = CounterAgent::spawn(fast_config(), tx)?;
    let handle = agent.handle();
    let controls = Controls::new(agent.handle());

    controls.down();
    assert_eq!(handle.step(), -1);
    controls.up();
    assert_eq!(handle.step(), 1);

    controls.stop();
    controls.stop();
    assert!(handle.is_stopped());
    assert!(!controls.is_enabled());

    controls.down();
    assert_eq!(handle.step(), 1);

    agent.join()?;
    Ok(())
}
