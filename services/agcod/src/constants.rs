use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers signed on every AGCOD request.
pub const ACCEPT_HEADER: &str = "accept";
pub const CONTENT_HEADER: &str = "content-type";
pub const HOST_HEADER: &str = "host";
pub const X_AMZ_DATE_HEADER: &str = "x-amz-date";
pub const X_AMZ_TARGET_HEADER: &str = "x-amz-target";

// Signature calculation parameters.
pub const AWS_SHA256_ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub const KEY_QUALIFIER: &str = "AWS4";
pub const TERMINATION_STRING: &str = "aws4_request";

// Content type per payload encoding. The XML value doubles as the
// accept/content-type header value in the canonical request, so the two must
// stay the same string.
pub const CONTENT_TYPE_XML: &str = "charset=UTF-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// Service defaults. Region must stay lowercase.
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_SERVICE: &str = "AGCODService";
pub const DEFAULT_HOST: &str = "agcod-v2.amazon.com";

// Prefix of the x-amz-target header value; the operation name is appended.
pub const TARGET_PREFIX: &str = "com.amazonaws.agcod.AGCODService";

// All AGCOD parameters travel in the body. Kept as an explicit canonical
// request field for forward compatibility.
pub const QUERY_STRING: &str = "";

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static AWS_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
