use crate::error::ClassificationResult;
use crate::ir::CallingConvention;
use crate::lowering::abi::{AbiArgInfo, Repr};
use crate::lowering::classification::AbiClassifier;
use crate::target::{AbiKind, Endianness, TargetConfig};
use crate::type_store::{TypeId, TypeStore};

// Classifies how values cross a call boundary per the AArch64 procedure call
// standard and its Darwin and Windows variants
// https://github.com/ARM-software/abi-aa/blob/main/aapcs64/aapcs64.rst
pub struct Aarch64Classifier {
	kind: AbiKind,
	extends_promotable_integers: bool,
	big_endian: bool,
	pointer_width_bits: u32,
}

impl Aarch64Classifier {
	fn classify_scalar(&self, type_store: &TypeStore, type_id: TypeId) -> AbiArgInfo {
		if let Some(signed) = type_id.promotable_integer(type_store) {
			if self.extends_promotable_integers {
				return AbiArgInfo::Extend { signed, repr: Repr::Scalar(type_id) };
			}
		}

		AbiArgInfo::Direct { repr: Repr::Scalar(type_id) }
	}
}

impl AbiClassifier for Aarch64Classifier {
	fn new(config: &TargetConfig) -> Aarch64Classifier {
		Aarch64Classifier {
			kind: config.abi_kind,
			extends_promotable_integers: config.abi_kind.extends_promotable_integers(),
			big_endian: config.endianness == Endianness::Big,
			pointer_width_bits: config.pointer_width_bits,
		}
	}

	fn classify_return(&self, type_store: &TypeStore, type_id: TypeId, _is_variadic: bool) -> ClassificationResult<AbiArgInfo> {
		if type_id.is_void(type_store) {
			return Ok(AbiArgInfo::Ignore);
		}

		// Vectors over 16 bytes are returned via memory by the real standard
		// but vector classification is not implemented at all yet, both sizes
		// must fail the same way rather than guess a shape
		if type_id.is_vector(type_store) {
			unsupported!("vector return values");
		}

		if !type_id.is_aggregate(type_store) {
			return Ok(self.classify_scalar(type_store, type_id));
		}

		let size = type_store.size_in_bits(type_id);
		if size == 0 {
			unsupported!("zero sized aggregates");
		}

		if size > 128 {
			// Returned in memory addressed by a hidden pointer, the callee
			// treats the buffer as its own
			let alignment_bits = type_store.align_in_bits(type_id);
			return Ok(AbiArgInfo::Indirect { alignment_bits, by_value: true });
		}

		// Composites are returned in the lower bits of a 64 bit register on
		// little-endian but the higher bits on big-endian, while integers use
		// the lower bits on both. Skipping the round up here is only safe on
		// little-endian, on big-endian a rounded composite would become
		// indistinguishable from a plain integer of the same width
		if size <= 64 && !self.big_endian {
			return Ok(AbiArgInfo::Direct { repr: Repr::int(size as u32) });
		}

		let alignment = type_store.align_in_bits(type_id);
		let size = align_to(size, 64) as u32;

		// A pair of i64 for 16 byte aggregates with 8 byte alignment, a
		// single i128 when the aggregate itself is 16 byte aligned
		if alignment < 128 && size == 128 {
			return Ok(AbiArgInfo::Direct { repr: Repr::int_array(64, 2) });
		}

		Ok(AbiArgInfo::Direct { repr: Repr::int(size) })
	}

	fn classify_argument(
		&self,
		type_store: &TypeStore,
		type_id: TypeId,
		_is_variadic: bool,
		_calling_convention: CallingConvention,
	) -> ClassificationResult<AbiArgInfo> {
		// A transparent union takes the ABI of its first member, this
		// substitution applies to arguments only, never to returns
		let type_id = type_id.transparent_union_member(type_store).unwrap_or(type_id);

		if type_id.is_vector(type_store) {
			unsupported!("vector arguments");
		}

		if !type_id.is_aggregate(type_store) {
			return Ok(self.classify_scalar(type_store, type_id));
		}

		let size = type_store.size_in_bits(type_id);
		if size == 0 {
			unsupported!("zero sized aggregates");
		}

		if size > 128 {
			// Passed by address without a forced private copy
			let alignment_bits = type_store.align_in_bits(type_id);
			return Ok(AbiArgInfo::Indirect { alignment_bits, by_value: false });
		}

		// Unlike returns, which always round to 64 bit register pairs,
		// argument slots round to whichever width the active variant
		// mandates. Standard AAPCS slots are 64 bit unless the type demands
		// 128 bit alignment, the vendor variants use at least pointer width
		let natural_alignment = type_store.align_in_bits(type_id);
		let slot_alignment = match self.kind {
			AbiKind::Aapcs => {
				if natural_alignment < 128 {
					64
				} else {
					128
				}
			}

			AbiKind::DarwinPcs | AbiKind::Win64 => natural_alignment.max(self.pointer_width_bits),
		};

		let size = align_to(size, slot_alignment as u64) as u32;
		if size == slot_alignment {
			return Ok(AbiArgInfo::Direct { repr: Repr::int(slot_alignment) });
		}

		Ok(AbiArgInfo::Direct { repr: Repr::int_array(slot_alignment, size / slot_alignment) })
	}
}

fn align_to(value: u64, alignment: u64) -> u64 {
	(value + alignment - 1) / alignment * alignment
}
