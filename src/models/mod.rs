//! Data models for Anchor and Shank IDL documents

pub mod account;
pub mod idl;
pub mod instruction;
pub mod types;

pub use self::account::{IdlAccountDef, IdlErrorCode};
pub use self::idl::{load_idl, parse_idl_content, validate_address, AnchorIdl, IdlMetadata};
pub use self::instruction::{IdlDiscriminant, IdlInstruction, IdlInstructionAccount};
pub use self::types::{IdlDefined, IdlEnumFields, IdlEnumVariant, IdlField, IdlType, IdlTypeDef, IdlTypeDefTy};
