//! Item Processor Use Case
//!
//! Drives options resolution → request construction → transport call →
//! response adaptation for every input item, strictly in input order.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use tweetshot_domain::{BinaryAttachment, CredentialRef, ErrorRecord, ItemOutcome, OutputItem};

use crate::error::{BatchError, ProcessResult};
use crate::options_resolver::resolve_options;
use crate::ports::{ParameterResolver, Transport};
use crate::request_builder::build_request;
use crate::response_adapter::{ResponseShape, adapt_response};

/// Use case for processing a batch of input items.
///
/// Each item yields exactly one record. With continue-on-error enabled a
/// failed item yields an [`ErrorRecord`] and the batch goes on; otherwise
/// the first failure aborts the batch and no records are returned.
///
/// # Example
///
/// ```ignore
/// let transport = ReqwestTransport::new(&settings, Arc::new(store))?;
/// let processor = ItemProcessor::new(Arc::new(transport), CredentialRef::default())
///     .continue_on_error(true);
///
/// let records = processor.process_batch(items.len(), &resolver).await?;
/// ```
pub struct ItemProcessor<T: Transport + ?Sized> {
    transport: Arc<T>,
    credential: CredentialRef,
    continue_on_error: bool,
}

impl<T: Transport + ?Sized> ItemProcessor<T> {
    /// Creates a processor that aborts on the first failure.
    pub const fn new(transport: Arc<T>, credential: CredentialRef) -> Self {
        Self {
            transport,
            credential,
            continue_on_error: false,
        }
    }

    /// Sets whether a failed item is recorded instead of aborting the batch.
    #[must_use]
    pub fn continue_on_error(mut self, enabled: bool) -> Self {
        self.continue_on_error = enabled;
        self
    }

    /// Processes a single item.
    ///
    /// # Errors
    ///
    /// Returns the first validation, transport, or response error hit.
    pub async fn process_item<R>(
        &self,
        item_index: usize,
        resolver: &R,
    ) -> ProcessResult<OutputItem>
    where
        R: ParameterResolver + ?Sized,
    {
        let options = resolve_options(resolver, item_index)?;
        let request = build_request(&options);
        debug!(
            item = item_index,
            status_id = options.target_id(),
            format = %options.format,
            output_mode = %options.output_mode,
            "requesting screenshot"
        );

        let response = self.transport.execute(&request, &self.credential).await?;
        let output = adapt_response(response, &options, item_index)?;

        info!(
            item = item_index,
            shape = ResponseShape::for_options(&options).as_str(),
            attachment_bytes = output.binary.as_ref().map_or(0, BinaryAttachment::len),
            "screenshot ready"
        );
        Ok(output)
    }

    /// Processes items `0..item_count` in order.
    ///
    /// # Errors
    ///
    /// With continue-on-error disabled, returns a [`BatchError`] for the
    /// first failing item; records already produced are discarded.
    pub async fn process_batch<R>(
        &self,
        item_count: usize,
        resolver: &R,
    ) -> Result<Vec<ItemOutcome>, BatchError>
    where
        R: ParameterResolver + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(item_count);

        for item_index in 0..item_count {
            match self.process_item(item_index, resolver).await {
                Ok(output) => outcomes.push(Ok(output)),
                Err(source) if self.continue_on_error => {
                    warn!(item = item_index, error = %source, "item failed, continuing");
                    outcomes.push(Err(ErrorRecord::new(item_index, source.to_string())));
                }
                Err(source) => {
                    error!(item = item_index, error = %source, "item failed, aborting batch");
                    return Err(BatchError { item_index, source });
                }
            }
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ProcessError, ValidationError};
    use crate::options_resolver::declared_default;
    use crate::ports::{ParameterError, TransportError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use tweetshot_domain::{OutboundRequest, RemoteResponse};

    /// Transport that answers every request with the same body and records what it saw.
    struct MockTransport {
        response: Result<RemoteResponse, TransportError>,
        seen: Mutex<Vec<OutboundRequest>>,
    }

    impl MockTransport {
        fn answering(response: RemoteResponse) -> Self {
            Self {
                response: Ok(response),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: TransportError) -> Self {
            Self {
                response: Err(err),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn urls(&self) -> Vec<String> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .map(OutboundRequest::path)
                .collect()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(
            &self,
            request: &OutboundRequest,
            _credential: &CredentialRef,
        ) -> Result<RemoteResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.response.clone()
        }
    }

    /// One parameter object per item, with declared defaults.
    struct PerItem(Vec<Value>);

    impl ParameterResolver for PerItem {
        fn resolve(&self, item_index: usize, field: &str) -> Result<Value, ParameterError> {
            let item = self
                .0
                .get(item_index)
                .ok_or(ParameterError::NoSuchItem { index: item_index })?;
            item.get(field)
                .cloned()
                .or_else(|| declared_default(field))
                .ok_or_else(|| ParameterError::Missing {
                    field: field.to_string(),
                })
        }
    }

    /// Five items where item 2 has an invalid theme.
    fn batch_with_bad_item() -> PerItem {
        PerItem(vec![
            json!({ "statusId": "100", "format": "png" }),
            json!({ "statusId": "101", "format": "png" }),
            json!({ "statusId": "102", "format": "png", "theme": "sepia" }),
            json!({ "statusId": "103", "format": "png" }),
            json!({ "statusId": "104", "format": "png" }),
        ])
    }

    fn png_transport() -> Arc<MockTransport> {
        Arc::new(MockTransport::answering(RemoteResponse::binary(b"PNG".to_vec())))
    }

    #[tokio::test]
    async fn test_continue_on_error_keeps_every_index() {
        let transport = png_transport();
        let processor =
            ItemProcessor::new(transport.clone(), CredentialRef::default()).continue_on_error(true);

        let outcomes = processor.process_batch(5, &batch_with_bad_item()).await.unwrap();

        assert_eq!(outcomes.len(), 5);
        for (index, outcome) in outcomes.iter().enumerate() {
            match outcome {
                Ok(item) => {
                    assert_ne!(index, 2);
                    assert_eq!(item.paired_item, index);
                    assert_eq!(item.binary.as_ref().unwrap().file_name, "tweet.png");
                }
                Err(record) => {
                    assert_eq!(index, 2);
                    assert_eq!(record.paired_item, 2);
                    assert!(record.message().contains("sepia"));
                }
            }
        }
        assert_eq!(
            transport.urls(),
            vec![
                "/api/v1/screenshot/100",
                "/api/v1/screenshot/101",
                "/api/v1/screenshot/103",
                "/api/v1/screenshot/104",
            ]
        );
    }

    #[tokio::test]
    async fn test_abort_stops_at_failing_item() {
        let transport = png_transport();
        let processor = ItemProcessor::new(transport.clone(), CredentialRef::default());

        let err = processor
            .process_batch(5, &batch_with_bad_item())
            .await
            .unwrap_err();

        assert_eq!(err.item_index, 2);
        assert!(matches!(
            err.source,
            ProcessError::Validation(ValidationError::Option(_))
        ));
        assert_eq!(transport.urls().len(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_recorded() {
        let transport = Arc::new(MockTransport::failing(TransportError::Status {
            status: 401,
            message: "invalid API key".to_string(),
        }));
        let processor =
            ItemProcessor::new(transport, CredentialRef::default()).continue_on_error(true);

        let outcomes = processor
            .process_batch(1, &PerItem(vec![json!({ "statusId": "1" })]))
            .await
            .unwrap();

        let record = outcomes[0].as_ref().unwrap_err();
        assert_eq!(
            record.message(),
            "request failed with status 401: invalid API key"
        );
    }

    #[tokio::test]
    async fn test_malformed_response_aborts() {
        let transport = Arc::new(MockTransport::answering(RemoteResponse::text("not json")));
        let processor = ItemProcessor::new(transport, CredentialRef::default());

        let err = processor
            .process_batch(
                2,
                &PerItem(vec![
                    json!({ "statusId": "1", "outputMode": "url" }),
                    json!({ "statusId": "2", "outputMode": "url" }),
                ]),
            )
            .await
            .unwrap_err();

        assert_eq!(err.item_index, 0);
        assert!(matches!(err.source, ProcessError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_request_matches_item_options() {
        let transport = Arc::new(MockTransport::answering(RemoteResponse::text("<div></div>")));
        let processor = ItemProcessor::new(transport.clone(), CredentialRef::default());

        let item = processor
            .process_item(
                0,
                &PerItem(vec![json!({
                    "statusId": "42",
                    "format": "html",
                    "additionalFields": { "showStats": false }
                })]),
            )
            .await
            .unwrap();

        assert_eq!(item.json.get("html"), Some(&json!("<div></div>")));
        let seen = transport.seen.lock().unwrap();
        assert_eq!(
            seen[0].query().keys(),
            vec!["format", "theme", "logo", "outputMode", "showStats"]
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let processor = ItemProcessor::new(png_transport(), CredentialRef::default());
        let outcomes = processor.process_batch(0, &PerItem(Vec::new())).await.unwrap();
        assert!(outcomes.is_empty());
    }
}
