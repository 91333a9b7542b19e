use crate::lowering::abi::AbiArgInfo;
use crate::type_store::TypeId;

// Read-only input to classification, carried per call site so a vendor
// fast-call attribute can diverge from the translation unit default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallingConvention(pub u32);

impl CallingConvention {
	pub const C: CallingConvention = CallingConvention(0);
}

#[derive(Debug, Clone)]
pub struct Parameter {
	pub type_id: TypeId,
	pub info: Option<AbiArgInfo>,
}

#[derive(Debug, Clone)]
pub struct FunctionSignature {
	pub parameters: Vec<Parameter>,
	pub return_type: TypeId,
	pub return_info: Option<AbiArgInfo>,
	pub calling_convention: CallingConvention,
	pub is_variadic: bool,
}

impl FunctionSignature {
	pub fn new(return_type: TypeId, parameter_types: &[TypeId]) -> FunctionSignature {
		let parameters = parameter_types
			.iter()
			.map(|&type_id| Parameter { type_id, info: None })
			.collect();

		FunctionSignature {
			parameters,
			return_type,
			return_info: None,
			calling_convention: CallingConvention::C,
			is_variadic: false,
		}
	}
}
