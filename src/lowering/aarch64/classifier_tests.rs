use crate::error::LoweringError;
use crate::ir::CallingConvention;
use crate::lowering::aarch64::classifier::Aarch64Classifier;
use crate::lowering::abi::{AbiArgInfo, Repr};
use crate::lowering::classification::AbiClassifier;
use crate::target::{AbiKind, Endianness, TargetConfig};
use crate::type_store::TypeStore;

const C: CallingConvention = CallingConvention::C;

fn classifier(abi_kind: AbiKind) -> Aarch64Classifier {
	let config = TargetConfig::new("aarch64-unknown-linux-gnu", abi_kind, Endianness::Little);
	Aarch64Classifier::new(&config)
}

fn big_endian_classifier() -> Aarch64Classifier {
	let config = TargetConfig::new("aarch64_be-unknown-linux-gnu", AbiKind::Aapcs, Endianness::Big);
	Aarch64Classifier::new(&config)
}

#[test]
fn test_void_return_is_ignored() {
	let type_store = TypeStore::new();
	let void_type_id = type_store.void_type_id();

	for abi_kind in [AbiKind::Aapcs, AbiKind::DarwinPcs, AbiKind::Win64] {
		let classifier = classifier(abi_kind);
		for is_variadic in [false, true] {
			let info = classifier.classify_return(&type_store, void_type_id, is_variadic).unwrap();
			assert_eq!(info, AbiArgInfo::Ignore);
		}
	}
}

#[test]
fn test_scalars_pass_unchanged() {
	let mut type_store = TypeStore::new();
	let i64_type_id = type_store.i64_type_id();
	let f64_type_id = type_store.f64_type_id();
	let pointer_type_id = type_store.pointer_to(i64_type_id);

	let classifier = classifier(AbiKind::Aapcs);
	for type_id in [i64_type_id, f64_type_id, pointer_type_id] {
		let expected = AbiArgInfo::Direct { repr: Repr::Scalar(type_id) };
		assert_eq!(classifier.classify_return(&type_store, type_id, false).unwrap(), expected);
		assert_eq!(classifier.classify_argument(&type_store, type_id, false, C).unwrap(), expected);
	}
}

#[test]
fn test_promotable_integer_extension_is_gated_by_kind() {
	let type_store = TypeStore::new();
	let i8_type_id = type_store.i8_type_id();
	let u16_type_id = type_store.u16_type_id();
	let bool_type_id = type_store.bool_type_id();

	let darwin = classifier(AbiKind::DarwinPcs);
	let info = darwin.classify_return(&type_store, i8_type_id, false).unwrap();
	assert_eq!(info, AbiArgInfo::Extend { signed: true, repr: Repr::Scalar(i8_type_id) });

	let info = darwin.classify_argument(&type_store, u16_type_id, false, C).unwrap();
	assert_eq!(info, AbiArgInfo::Extend { signed: false, repr: Repr::Scalar(u16_type_id) });

	let info = darwin.classify_argument(&type_store, bool_type_id, false, C).unwrap();
	assert_eq!(info, AbiArgInfo::Extend { signed: false, repr: Repr::Scalar(bool_type_id) });

	for abi_kind in [AbiKind::Aapcs, AbiKind::Win64] {
		let classifier = classifier(abi_kind);
		let info = classifier.classify_return(&type_store, i8_type_id, false).unwrap();
		assert_eq!(info, AbiArgInfo::Direct { repr: Repr::Scalar(i8_type_id) });

		let info = classifier.classify_argument(&type_store, i8_type_id, false, C).unwrap();
		assert_eq!(info, AbiArgInfo::Direct { repr: Repr::Scalar(i8_type_id) });
	}
}

#[test]
fn test_small_return_aggregate_keeps_exact_width() {
	let mut type_store = TypeStore::new();
	let u8_type_id = type_store.u8_type_id();
	let three_bytes = type_store.register_struct(&[u8_type_id, u8_type_id, u8_type_id]);

	let classifier = classifier(AbiKind::Aapcs);
	let info = classifier.classify_return(&type_store, three_bytes, false).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int(24) });
}

#[test]
fn test_small_return_aggregate_rounds_up_on_big_endian() {
	let mut type_store = TypeStore::new();
	let u8_type_id = type_store.u8_type_id();
	let three_bytes = type_store.register_struct(&[u8_type_id, u8_type_id, u8_type_id]);

	let classifier = big_endian_classifier();
	let info = classifier.classify_return(&type_store, three_bytes, false).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int(64) });
}

#[test]
fn test_two_register_return() {
	let mut type_store = TypeStore::new();
	let u8_type_id = type_store.u8_type_id();
	let u64_type_id = type_store.u64_type_id();

	let classifier = classifier(AbiKind::Aapcs);

	// 9 bytes rounds to a pair of 64 bit registers
	let nine_bytes = type_store.array_of(u8_type_id, 9);
	let info = classifier.classify_return(&type_store, nine_bytes, false).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int_array(64, 2) });

	// 16 bytes with 8 byte alignment stays a pair, not an i128
	let two_words = type_store.register_struct(&[u64_type_id, u64_type_id]);
	let info = classifier.classify_return(&type_store, two_words, false).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int_array(64, 2) });
}

#[test]
fn test_sixteen_byte_aligned_return_uses_single_register_pair_type() {
	let mut type_store = TypeStore::new();
	let u128_type_id = type_store.u128_type_id();
	let aligned = type_store.register_struct(&[u128_type_id]);

	let classifier = classifier(AbiKind::Aapcs);
	let info = classifier.classify_return(&type_store, aligned, false).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int(128) });
}

#[test]
fn test_large_return_aggregate_is_indirect() {
	let mut type_store = TypeStore::new();
	let u64_type_id = type_store.u64_type_id();
	let three_words = type_store.register_struct(&[u64_type_id, u64_type_id, u64_type_id]);

	let classifier = classifier(AbiKind::Aapcs);
	let info = classifier.classify_return(&type_store, three_words, false).unwrap();
	assert_eq!(info, AbiArgInfo::Indirect { alignment_bits: 64, by_value: true });
}

#[test]
fn test_large_argument_aggregate_is_indirect_without_copy() {
	let mut type_store = TypeStore::new();
	let u64_type_id = type_store.u64_type_id();
	let three_words = type_store.register_struct(&[u64_type_id, u64_type_id, u64_type_id]);

	let classifier = classifier(AbiKind::Aapcs);
	let info = classifier.classify_argument(&type_store, three_words, false, C).unwrap();
	assert_eq!(info, AbiArgInfo::Indirect { alignment_bits: 64, by_value: false });
}

#[test]
fn test_aapcs_argument_slot_rounding() {
	let mut type_store = TypeStore::new();
	let u8_type_id = type_store.u8_type_id();
	let u32_type_id = type_store.u32_type_id();
	let u64_type_id = type_store.u64_type_id();

	let classifier = classifier(AbiKind::Aapcs);

	// 12 bytes rounds up to two 64 bit slots
	let twelve_bytes = type_store.array_of(u8_type_id, 12);
	let info = classifier.classify_argument(&type_store, twelve_bytes, false, C).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int_array(64, 2) });

	// 4 bytes rounds up to a single slot
	let four_bytes = type_store.register_struct(&[u32_type_id]);
	let info = classifier.classify_argument(&type_store, four_bytes, false, C).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int(64) });

	// Exactly one slot stays one slot
	let one_word = type_store.register_struct(&[u64_type_id]);
	let info = classifier.classify_argument(&type_store, one_word, false, C).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int(64) });
}

#[test]
fn test_aapcs_sixteen_byte_aligned_argument_uses_wide_slot() {
	let mut type_store = TypeStore::new();
	let u128_type_id = type_store.u128_type_id();
	let aligned = type_store.register_struct(&[u128_type_id]);

	let classifier = classifier(AbiKind::Aapcs);
	let info = classifier.classify_argument(&type_store, aligned, false, C).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int(128) });
}

#[test]
fn test_vendor_argument_slot_is_at_least_pointer_width() {
	let mut type_store = TypeStore::new();
	let u32_type_id = type_store.u32_type_id();
	let four_bytes = type_store.register_struct(&[u32_type_id]);

	for abi_kind in [AbiKind::DarwinPcs, AbiKind::Win64] {
		let classifier = classifier(abi_kind);
		let info = classifier.classify_argument(&type_store, four_bytes, false, C).unwrap();
		assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int(64) });
	}
}

#[test]
fn test_transparent_union_substitution_is_argument_only() {
	let mut type_store = TypeStore::new();
	let i32_type_id = type_store.i32_type_id();
	let u32_type_id = type_store.u32_type_id();
	let union_type_id = type_store.register_union(true, &[i32_type_id, u32_type_id]);

	let classifier = classifier(AbiKind::Aapcs);

	// As an argument the union takes its first member's classification
	let info = classifier.classify_argument(&type_store, union_type_id, false, C).unwrap();
	let member_info = classifier.classify_argument(&type_store, i32_type_id, false, C).unwrap();
	assert_eq!(info, member_info);
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::Scalar(i32_type_id) });

	// As a return it is still an aggregate
	let info = classifier.classify_return(&type_store, union_type_id, false).unwrap();
	assert_eq!(info, AbiArgInfo::Direct { repr: Repr::int(32) });
}

#[test]
fn test_vector_types_are_rejected() {
	let mut type_store = TypeStore::new();
	let f32_type_id = type_store.f32_type_id();
	let u8_type_id = type_store.u8_type_id();

	let four_floats = type_store.vector_of(f32_type_id, 4);
	let oversized = type_store.vector_of(u8_type_id, 32);

	let classifier = classifier(AbiKind::Aapcs);
	for vector in [four_floats, oversized] {
		let error = classifier.classify_return(&type_store, vector, false).unwrap_err();
		assert_eq!(error, LoweringError::Unsupported { feature: "vector return values" });

		let error = classifier.classify_argument(&type_store, vector, false, C).unwrap_err();
		assert_eq!(error, LoweringError::Unsupported { feature: "vector arguments" });
	}
}

#[test]
fn test_zero_sized_aggregates_are_rejected() {
	let mut type_store = TypeStore::new();
	let empty = type_store.register_struct(&[]);

	let classifier = classifier(AbiKind::Aapcs);
	assert!(classifier.classify_return(&type_store, empty, false).is_err());
	assert!(classifier.classify_argument(&type_store, empty, false, C).is_err());
}

#[test]
fn test_classification_is_deterministic() {
	let mut type_store = TypeStore::new();
	let u8_type_id = type_store.u8_type_id();
	let i16_type_id = type_store.i16_type_id();
	let u64_type_id = type_store.u64_type_id();

	let type_ids = [
		i16_type_id,
		type_store.pointer_to(u64_type_id),
		type_store.register_struct(&[u8_type_id, u64_type_id]),
		type_store.array_of(u8_type_id, 24),
	];

	for abi_kind in [AbiKind::Aapcs, AbiKind::DarwinPcs, AbiKind::Win64] {
		let classifier = classifier(abi_kind);
		for type_id in type_ids {
			let first = classifier.classify_return(&type_store, type_id, false);
			let second = classifier.classify_return(&type_store, type_id, false);
			assert_eq!(first, second);

			let first = classifier.classify_argument(&type_store, type_id, false, C);
			let second = classifier.classify_argument(&type_store, type_id, false, C);
			assert_eq!(first, second);
		}
	}
}
