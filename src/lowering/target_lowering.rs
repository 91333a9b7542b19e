use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::ClassificationResult;
use crate::ir::FunctionSignature;
use crate::lowering::aarch64::classifier::Aarch64Classifier;
use crate::lowering::classification::AbiClassifier;
use crate::target::TargetConfig;
use crate::type_store::TypeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSpace {
	OffloadPrivate,
	OffloadLocal,
	OffloadGlobal,
	OffloadConstant,
	OffloadGeneric,
	Named(u32),
}

pub struct TargetLowering {
	pub config: TargetConfig,
	classifier: Aarch64Classifier,
}

impl TargetLowering {
	pub fn new(config: TargetConfig) -> TargetLowering {
		let classifier = Aarch64Classifier::new(&config);
		TargetLowering { config, classifier }
	}

	pub fn compute_signature(&self, type_store: &TypeStore, signature: &mut FunctionSignature) -> ClassificationResult<()> {
		// A language level override such as a constructor or this-return
		// convention may have filled the return slot in already, in which
		// case the classifier must not run for it
		if signature.return_info.is_none() {
			let info = self
				.classifier
				.classify_return(type_store, signature.return_type, signature.is_variadic)?;
			signature.return_info = Some(info);
		}

		let calling_convention = signature.calling_convention;
		for parameter in &mut signature.parameters {
			let info = self
				.classifier
				.classify_argument(type_store, parameter.type_id, signature.is_variadic, calling_convention)?;
			parameter.info = Some(info);
		}

		Ok(())
	}

	// Unrelated to argument passing, the code generator asks for the
	// target's numbering of abstract address spaces. An unmapped space is a
	// configuration bug, not a user error
	pub fn target_address_space(&self, address_space: AddressSpace) -> u32 {
		match address_space {
			AddressSpace::OffloadPrivate
			| AddressSpace::OffloadLocal
			| AddressSpace::OffloadGlobal
			| AddressSpace::OffloadConstant
			| AddressSpace::OffloadGeneric => 0,

			AddressSpace::Named(space) => panic!("Address space {space} has no mapping on this target"),
		}
	}
}

// Multiple compilation units may race to request the same target's lowering,
// construction is idempotent and whichever instance lands in the map wins
pub struct TargetLoweringStore {
	lowerings: RwLock<FxHashMap<String, Arc<TargetLowering>>>,
}

impl TargetLoweringStore {
	pub fn new() -> TargetLoweringStore {
		TargetLoweringStore { lowerings: RwLock::new(FxHashMap::default()) }
	}

	pub fn get_or_create(&self, config: &TargetConfig) -> Arc<TargetLowering> {
		if let Some(lowering) = self.lowerings.read().get(config.triple.as_str()) {
			return lowering.clone();
		}

		let mut lowerings = self.lowerings.write();
		lowerings
			.entry(config.triple.clone())
			.or_insert_with(|| Arc::new(TargetLowering::new(config.clone())))
			.clone()
	}
}
