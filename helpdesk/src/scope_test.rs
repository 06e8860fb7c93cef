use super::*;

use futures::channel::oneshot;

#[tokio::test]
async fn run_passes_through_result() {
    let scope = RequestScope::new();
    let value = scope.run(async { Ok::<_, ApiError>(41 + 1) }).await.expect("value");
    assert_eq!(value, 42);
    assert_eq!(scope.in_flight(), 0);
}

#[tokio::test]
async fn run_passes_through_errors() {
    let scope = RequestScope::new();
    let err = scope
        .run(async { Err::<(), _>(ApiError::NotLoggedIn) })
        .await
        .expect_err("error");
    assert!(matches!(err, ApiError::NotLoggedIn));
}

#[tokio::test]
async fn cancelled_scope_refuses_new_requests() {
    let scope = RequestScope::new();
    scope.cancel();
    let err = scope.run(async { Ok::<_, ApiError>(1) }).await.expect_err("cancelled");
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn cancel_aborts_in_flight_request() {
    let scope = RequestScope::new();
    let (tx, rx) = oneshot::channel::<u32>();

    let pending = scope.run(async move { rx.await.map_err(|_| ApiError::Cancelled) });
    let canceller = async {
        tokio::task::yield_now().await;
        assert_eq!(scope.in_flight(), 1);
        scope.cancel();
        // A late response must not leak through.
        let _ = tx.send(7);
    };

    let (result, ()) = futures::join!(pending, canceller);
    assert!(result.expect_err("cancelled").is_cancelled());
    assert_eq!(scope.in_flight(), 0);
}

#[tokio::test]
async fn clones_share_cancellation() {
    let scope = RequestScope::new();
    let view_copy = scope.clone();
    view_copy.cancel();
    assert!(scope.is_cancelled());
}
