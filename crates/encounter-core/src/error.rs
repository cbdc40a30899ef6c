use thiserror::Error;

use crate::models::code::CodeId;
use crate::models::modifier::ModifierId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("duplicate code id in catalog: {0}")]
    DuplicateCode(CodeId),

    #[error("code {code} lists modifier {modifier} more than once")]
    DuplicateModifier { code: CodeId, modifier: ModifierId },
}
