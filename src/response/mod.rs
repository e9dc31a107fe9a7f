/*!
 * Model-response handling.
 *
 * - `json`: Recovers the first balanced JSON object from a model reply
 * - `retry`: Retries generation attempts that produced unusable replies
 */

pub mod json;
pub mod retry;

pub use json::{clean_json_response, parse_json_response, require_keys};
pub use retry::{RetryPolicy, generate_json, generate_with_retry};
