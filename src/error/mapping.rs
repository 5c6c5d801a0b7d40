//! Classification of service error codes.

/// Well-known service error codes, for callers that branch on the condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// The queue does not exist.
    QueueDoesNotExist,
    /// A queue with this name already exists with different attributes.
    QueueAlreadyExists,
    /// The queue was deleted within the last 60 seconds.
    QueueDeletedRecently,
    /// The caller is not allowed to perform the action.
    AccessDenied,
    /// The access key is unknown to the service.
    InvalidClientTokenId,
    /// The computed signature did not match.
    SignatureDoesNotMatch,
    /// The request timestamp is outside the accepted window.
    RequestExpired,
    /// A parameter value was rejected.
    InvalidParameterValue,
    /// A required parameter is missing.
    MissingParameter,
    /// The attribute name is not recognised.
    InvalidAttributeName,
    /// The receipt handle is not valid for this queue.
    ReceiptHandleIsInvalid,
    /// The message is not currently in flight.
    MessageNotInflight,
    /// The queue holds too many in-flight messages.
    OverLimit,
    /// The request was throttled.
    Throttling,
    /// The service failed internally.
    InternalError,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
    /// Any other code.
    Other,
}

impl ServiceErrorKind {
    /// Map a service error code to its kind.
    pub fn from_code(code: &str) -> Self {
        match code {
            "AWS.SimpleQueueService.NonExistentQueue" | "QueueDoesNotExist" => {
                ServiceErrorKind::QueueDoesNotExist
            }
            "QueueAlreadyExists" | "AWS.SimpleQueueService.QueueNameExists" => {
                ServiceErrorKind::QueueAlreadyExists
            }
            "AWS.SimpleQueueService.QueueDeletedRecently" => ServiceErrorKind::QueueDeletedRecently,
            "AccessDenied" => ServiceErrorKind::AccessDenied,
            "InvalidClientTokenId" => ServiceErrorKind::InvalidClientTokenId,
            "SignatureDoesNotMatch" | "AuthFailure" => ServiceErrorKind::SignatureDoesNotMatch,
            "RequestExpired" => ServiceErrorKind::RequestExpired,
            "InvalidParameterValue" | "InvalidParameterCombination" => {
                ServiceErrorKind::InvalidParameterValue
            }
            "MissingParameter" => ServiceErrorKind::MissingParameter,
            "InvalidAttributeName" => ServiceErrorKind::InvalidAttributeName,
            "ReceiptHandleIsInvalid" | "InvalidReceiptHandle" => {
                ServiceErrorKind::ReceiptHandleIsInvalid
            }
            "AWS.SimpleQueueService.MessageNotInflight" => ServiceErrorKind::MessageNotInflight,
            "OverLimit" => ServiceErrorKind::OverLimit,
            "Throttling" | "RequestThrottled" => ServiceErrorKind::Throttling,
            "InternalError" | "InternalFailure" => ServiceErrorKind::InternalError,
            "ServiceUnavailable" => ServiceErrorKind::ServiceUnavailable,
            _ => ServiceErrorKind::Other,
        }
    }

    /// Returns true for conditions a higher layer may reasonably retry.
    ///
    /// The client itself never retries.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ServiceErrorKind::Throttling
                | ServiceErrorKind::InternalError
                | ServiceErrorKind::ServiceUnavailable
                | ServiceErrorKind::QueueDeletedRecently
        )
    }
}
