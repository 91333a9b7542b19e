use crate::error::ClassificationResult;
use crate::ir::CallingConvention;
use crate::lowering::abi::AbiArgInfo;
use crate::target::TargetConfig;
use crate::type_store::{TypeId, TypeStore};

// One implementation per target architecture. Classification must be a pure
// function of its inputs, repeated calls with the same type and configuration
// have to produce identical results for codegen to be reproducible
pub trait AbiClassifier {
	fn new(config: &TargetConfig) -> Self;

	fn classify_return(&self, type_store: &TypeStore, type_id: TypeId, is_variadic: bool) -> ClassificationResult<AbiArgInfo>;

	fn classify_argument(
		&self,
		type_store: &TypeStore,
		type_id: TypeId,
		is_variadic: bool,
		calling_convention: CallingConvention,
	) -> ClassificationResult<AbiArgInfo>;
}
