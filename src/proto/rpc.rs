//! Types from the `google.rpc` package.

/// The logical error model returned in the body of failed API calls.
///
/// `code` holds a `google.rpc.Code` value, which shares its numbering with
/// [`tonic::Code`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Status {
    #[prost(int32, tag = "1")]
    pub code: i32,
    /// A developer-facing error message, in English.
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub details: ::prost::alloc::vec::Vec<super::protobuf::Any>,
}
