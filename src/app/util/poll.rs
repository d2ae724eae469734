use std::{future::Future, time::Duration};

use tokio::time::{sleep, Instant};

#[derive(Debug)]
pub enum PollError<E> {
    TimedOut(Duration),
    Check(E),
}

/// Calls `check` until it yields a value, sleeping `interval` between calls.
///
/// `check` returns `Ok(None)` while the awaited state has not been reached.
/// An `Err` from `check` stops polling immediately. Gives up with
/// `PollError::TimedOut` once another sleep would exceed `max_wait`.
pub async fn poll_until<T, E, F, Fut>(
    interval: Duration,
    max_wait: Duration,
    mut check: F,
) -> Result<T, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let started = Instant::now();

    loop {
        match check().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => return Err(PollError::Check(e)),
        }

        let elapsed = started.elapsed();
        if elapsed + interval > max_wait {
            return Err(PollError::TimedOut(elapsed));
        }

        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn returns_once_check_yields() {
        let calls = Arc::new(AtomicUsize::new(0));

        let result: Result<usize, PollError<()>> = poll_until(
            Duration::from_secs(5),
            Duration::from_secs(600),
            || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Ok(if n == 3 { Some(n) } else { None })
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_state_never_arrives() {
        let calls = Arc::new(AtomicUsize::new(0));

        let result: Result<(), PollError<()>> = poll_until(
            Duration::from_secs(5),
            Duration::from_secs(20),
            || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                }
            },
        )
        .await;

        assert!(matches!(result, Err(PollError::TimedOut(_))));
        // checks at 0s, 5s, 10s, 15s and 20s
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_check_error() {
        let result: Result<(), PollError<&str>> =
            poll_until(Duration::from_secs(1), Duration::from_secs(10), || async {
                Err("boom")
            })
            .await;

        assert!(matches!(result, Err(PollError::Check("boom"))));
    }
}
