//! Endpoint pipeline.
//!
//! An [`Endpoint`] bundles everything declared about one route: its
//! parameters, an optional request body schema and an optional response
//! model. [`Endpoint::call`] runs the whole pipeline around a handler:
//!
//! ```text
//! bind params -> decode + validate body -> handler -> shape response
//! ```
//!
//! Endpoints are immutable and can be shared across threads.

use crate::schema::SchemaError;
use crate::shaper::shape_serializable;
use crate::{
    bind_with, error_response, parse_json_body, validate_with, BoundRequest, ExtractOptions,
    ExtractionContext, ExtractionError, ExtractionSource, JsonResponse, ParamSpec, Schema,
    ValidatedBody,
};
use bytes::Bytes;
use http::{Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Values handed to a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerInput {
    /// Bound parameters.
    pub params: BoundRequest,
    /// Validated body, present when the endpoint declares a request body.
    pub body: Option<ValidatedBody>,
}

/// Declared shape of one route.
///
/// # Example
///
/// ```rust
/// use heron_extract::{Endpoint, ExtractionContext, FieldType, ParamSpec};
/// use serde_json::json;
///
/// let endpoint = Endpoint::builder("read_item")
///     .param(ParamSpec::path("item_id", FieldType::Integer))
///     .build()
///     .unwrap();
///
/// let ctx = ExtractionContext::builder().path_param("item_id", "10").build();
/// let out = endpoint
///     .call(&ctx, |input| json!({"item_id": input.params.get("item_id")}))
///     .unwrap();
///
/// assert_eq!(out, json!({"item_id": 10}));
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    name: String,
    params: Vec<ParamSpec>,
    request_body: Option<Schema>,
    response_model: Option<Schema>,
    status: StatusCode,
    options: ExtractOptions,
}

impl Endpoint {
    /// Starts declaring an endpoint. `name` is used in log events.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder::new(name)
    }

    /// Returns the endpoint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared parameters.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Returns the request body schema, if any.
    #[must_use]
    pub fn request_body(&self) -> Option<&Schema> {
        self.request_body.as_ref()
    }

    /// Returns the response model, if any.
    #[must_use]
    pub fn response_model(&self) -> Option<&Schema> {
        self.response_model.as_ref()
    }

    /// Returns the status used for successful responses.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the extraction options.
    #[must_use]
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Binds parameters and validates the body.
    pub fn extract(&self, ctx: &ExtractionContext) -> Result<HandlerInput, ExtractionError> {
        let params = bind_with(ctx, &self.params, &self.options)?;
        let body = match &self.request_body {
            Some(schema) => {
                let raw = parse_json_body(ctx, &self.options)?;
                Some(validate_with(&raw, schema, self.options.coercion)?)
            }
            None => None,
        };
        Ok(HandlerInput { params, body })
    }

    /// Serializes handler output and shapes it with the response model.
    ///
    /// Without a response model the serialized output is returned as is.
    pub fn finish<R: Serialize + ?Sized>(&self, output: &R) -> Result<Value, ExtractionError> {
        match &self.response_model {
            Some(schema) => shape_serializable(output, schema, self.options.coercion),
            None => serde_json::to_value(output)
                .map_err(|e| ExtractionError::malformed(ExtractionSource::Response, e.to_string())),
        }
    }

    /// Runs the full pipeline around `handler`.
    ///
    /// The handler is not invoked when extraction fails.
    pub fn call<F, R>(&self, ctx: &ExtractionContext, handler: F) -> Result<Value, ExtractionError>
    where
        F: FnOnce(HandlerInput) -> R,
        R: Serialize,
    {
        let input = self.extract(ctx)?;
        let output = handler(input);
        self.finish(&output)
    }

    /// Runs the pipeline and renders the outcome as an HTTP response.
    ///
    /// Request errors are logged at debug level. Response errors mean the
    /// handler broke its declared model and are logged at error level.
    pub fn respond<F, R>(&self, ctx: &ExtractionContext, handler: F) -> Response<Bytes>
    where
        F: FnOnce(HandlerInput) -> R,
        R: Serialize,
    {
        match self.call(ctx, handler) {
            Ok(value) => JsonResponse::new(value)
                .with_status(self.status)
                .into_response(),
            Err(err) => {
                if err.is_response_error() {
                    tracing::error!(
                        endpoint = %self.name,
                        field = err.field().unwrap_or_default(),
                        error = %err,
                        "handler output does not match response model"
                    );
                } else {
                    tracing::debug!(
                        endpoint = %self.name,
                        status = err.status_code().as_u16(),
                        code = err.error_code(),
                        "request rejected"
                    );
                }
                error_response(&err)
            }
        }
    }
}

/// Builder for [`Endpoint`].
#[derive(Debug)]
pub struct EndpointBuilder {
    name: String,
    params: Vec<ParamSpec>,
    request_body: Option<Schema>,
    response_model: Option<Schema>,
    status: StatusCode,
    options: ExtractOptions,
}

impl EndpointBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            request_body: None,
            response_model: None,
            status: StatusCode::OK,
            options: ExtractOptions::default(),
        }
    }

    /// Declares a parameter.
    #[must_use]
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Declares several parameters.
    #[must_use]
    pub fn params(mut self, specs: impl IntoIterator<Item = ParamSpec>) -> Self {
        self.params.extend(specs);
        self
    }

    /// Declares the request body schema.
    #[must_use]
    pub fn request_body(mut self, schema: Schema) -> Self {
        self.request_body = Some(schema);
        self
    }

    /// Declares the response model.
    #[must_use]
    pub fn response_model(mut self, schema: Schema) -> Self {
        self.response_model = Some(schema);
        self
    }

    /// Sets the status of successful responses (default 200).
    #[must_use]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Sets the extraction options.
    #[must_use]
    pub fn options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the endpoint, rejecting duplicate parameter names.
    pub fn build(self) -> Result<Endpoint, SchemaError> {
        for (i, spec) in self.params.iter().enumerate() {
            if self.params[..i].iter().any(|p| p.name() == spec.name()) {
                return Err(SchemaError::DuplicateField {
                    name: spec.name().to_string(),
                });
            }
        }
        Ok(Endpoint {
            name: self.name,
            params: self.params,
            request_body: self.request_body,
            response_model: self.response_model,
            status: self.status,
            options: self.options,
        })
    }
}
