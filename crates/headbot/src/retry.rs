//! Refresh-then-retry-once controller for resource calls.
//!
//! Each phase is its own type and every transition consumes it:
//!
//! ```text
//! Sent --AuthRejected--> Refreshing --refreshed--> Retried --any--> done
//!   \--Success/Other--> done      \--refresh failed--> done
//! ```
//!
//! [`Retried`] has no transition back to [`Refreshing`], so a call can be
//! refreshed and retried at most once.

use crate::error::Error;
use crate::executor::ExecOutcome;

/// The first attempt has been sent.
#[derive(Debug)]
pub(crate) struct Sent;

/// The first attempt was rejected for auth; a refresh is in flight.
#[derive(Debug)]
pub(crate) struct Refreshing;

/// The request has been re-sent after a successful refresh.
#[derive(Debug)]
pub(crate) struct Retried;

/// What to do after the first attempt.
#[derive(Debug)]
pub(crate) enum AfterFirst<T> {
    Done(Result<T, Error>),
    Refresh(Refreshing),
}

impl Sent {
    pub(crate) fn on_response<T>(self, outcome: ExecOutcome<T>) -> AfterFirst<T> {
        match outcome {
            ExecOutcome::Success(body) => AfterFirst::Done(Ok(body)),
            ExecOutcome::OtherFailure(err) => AfterFirst::Done(Err(err)),
            ExecOutcome::AuthRejected(_) => AfterFirst::Refresh(Refreshing),
        }
    }
}

impl Refreshing {
    /// A failed refresh ends the call; no further request is sent.
    pub(crate) fn on_refresh<P>(self, refreshed: Result<P, Error>) -> Result<(Retried, P), Error> {
        refreshed.map(|pair| (Retried, pair))
    }
}

impl Retried {
    /// The retried attempt is final, including a second auth rejection.
    pub(crate) fn on_response<T>(self, outcome: ExecOutcome<T>) -> Result<T, Error> {
        match outcome {
            ExecOutcome::Success(body) => Ok(body),
            ExecOutcome::AuthRejected(err) => Err(err.into()),
            ExecOutcome::OtherFailure(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthError, ProtocolError, TransportError};

    fn rejected<T>() -> ExecOutcome<T> {
        ExecOutcome::AuthRejected(ProtocolError::new(
            401,
            Some("token_not_valid".into()),
            None,
        ))
    }

    fn server_error<T>() -> ExecOutcome<T> {
        ExecOutcome::OtherFailure(ProtocolError::new(500, None, None).into())
    }

    #[test]
    fn success_on_first_attempt_finishes() {
        match Sent.on_response(ExecOutcome::Success(7)) {
            AfterFirst::Done(Ok(7)) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn other_failure_on_first_attempt_is_not_retried() {
        match Sent.on_response::<u8>(server_error()) {
            AfterFirst::Done(Err(Error::Protocol(e))) => assert_eq!(e.status, 500),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn transport_failure_on_first_attempt_is_not_retried() {
        let outcome = ExecOutcome::<u8>::OtherFailure(
            TransportError::Connection {
                message: "reset".into(),
            }
            .into(),
        );
        assert!(matches!(
            Sent.on_response(outcome),
            AfterFirst::Done(Err(Error::Transport(_)))
        ));
    }

    #[test]
    fn auth_rejection_requests_refresh() {
        assert!(matches!(
            Sent.on_response::<u8>(rejected()),
            AfterFirst::Refresh(Refreshing)
        ));
    }

    #[test]
    fn failed_refresh_ends_the_call() {
        let refreshed: Result<(), Error> = Err(AuthError::Rejected {
            endpoint: "token/refresh/".into(),
        }
        .into());
        let err = Refreshing.on_refresh(refreshed).unwrap_err();
        assert_eq!(err.to_string(), "Authorization (token/refresh/) failed");
    }

    #[test]
    fn successful_refresh_hands_back_the_pair() {
        let (Retried, pair) = Refreshing.on_refresh(Ok("new-pair")).unwrap();
        assert_eq!(pair, "new-pair");
    }

    #[test]
    fn second_rejection_is_terminal() {
        let err = Retried.on_response::<u8>(rejected()).unwrap_err();
        assert!(err.is_auth_error());
        assert!(matches!(err, Error::Protocol(ref e) if e.status == 401));
    }

    #[test]
    fn retried_result_is_returned_as_is() {
        assert_eq!(Retried.on_response(ExecOutcome::Success("body")).unwrap(), "body");
        assert!(Retried.on_response::<u8>(server_error()).is_err());
    }
}
