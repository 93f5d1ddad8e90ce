//! The process-wide convenience surface. Everything lives in one test
//! function because the surface is deliberately one-per-process.

use std::time::Duration;

use wisp::{Notification, WindowError};

#[test]
fn process_wide_surface_is_idempotent_and_marshals() {
  let _ = tracing_subscriber::fmt().with_test_writer().try_init();

  // initialize from a pile of threads at once; exactly one ghost thread is
  // spawned and every caller sees the same readiness
  let callers: Vec<_> = (0..8)
    .map(|_| std::thread::spawn(wisp::initialize))
    .collect();
  for caller in callers {
    assert!(caller.join().unwrap());
  }
  assert!(wisp::initialize());
  assert_eq!(wisp::window_count(), Ok(0));
  let notifications = wisp::notifications().unwrap();

  let window = wisp::create("T", 800, 600).unwrap();
  assert_eq!(window.width(), 800);
  assert_eq!(window.height(), 600);
  assert_eq!(wisp::window_count(), Ok(1));

  assert_eq!(wisp::close(&window), Ok(()));
  assert_eq!(wisp::window_count(), Ok(0));
  assert_eq!(
    wisp::close(&window),
    Err(WindowError::UnknownHandle(window.raw())),
  );

  assert_eq!(
    notifications.recv_timeout(Duration::from_millis(500)),
    Ok(Notification::Destroyed(window.raw())),
  );

  // the headless driver is exposed for exactly this kind of poking
  let driver = wisp::driver().unwrap();
  driver.post_quit();
  assert_eq!(
    notifications.recv_timeout(Duration::from_millis(500)),
    Ok(Notification::Quit),
  );
  assert_eq!(wisp::create("late", 1, 1), Err(WindowError::NotRunning));
}
