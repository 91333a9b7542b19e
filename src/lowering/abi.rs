use crate::type_store::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repr {
	// The value keeps its own representation, used for scalars and pointers
	Scalar(TypeId),
	Int { bits: u32 },
	IntArray { bits: u32, count: u32 },
}

impl Repr {
	pub fn int(bits: u32) -> Repr {
		assert!(bits % 8 == 0 && bits <= 128, "{bits}");
		Repr::Int { bits }
	}

	pub fn int_array(bits: u32, count: u32) -> Repr {
		assert!(bits % 8 == 0 && bits <= 128, "{bits}");
		assert!(count >= 2, "{count}");
		Repr::IntArray { bits, count }
	}
}

// The classifier's sole output. Values are created fresh per classification,
// attached to a signature slot and never mutated afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiArgInfo {
	// No storage at all, only produced for a void return
	Ignore,

	Direct { repr: Repr },

	// Like `Direct` but the value must be sign or zero extended to register
	// width across the call boundary
	Extend { signed: bool, repr: Repr },

	// Passed or returned through a pointer to a buffer. `by_value` requires
	// the callee to treat the buffer as its own private copy
	Indirect { alignment_bits: u32, by_value: bool },
}
