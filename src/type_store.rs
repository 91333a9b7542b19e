#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeId {
	entry: u32,
}

impl TypeId {
	pub fn index(self) -> usize {
		self.entry as usize
	}

	pub fn is_void(self, type_store: &TypeStore) -> bool {
		let entry = type_store.type_entries[self.index()];
		matches!(entry.kind, TypeEntryKind::BuiltinType { kind: PrimitiveKind::Void })
	}

	pub fn is_vector(self, type_store: &TypeStore) -> bool {
		let entry = type_store.type_entries[self.index()];
		matches!(entry.kind, TypeEntryKind::Vector { .. })
	}

	pub fn is_pointer(self, type_store: &TypeStore) -> bool {
		let entry = type_store.type_entries[self.index()];
		matches!(entry.kind, TypeEntryKind::Pointer { .. })
	}

	// Scalars, pointers and vectors pass through classification on their own
	// shape, everything structured counts as an aggregate for ABI purposes
	pub fn is_aggregate(self, type_store: &TypeStore) -> bool {
		let entry = type_store.type_entries[self.index()];
		match entry.kind {
			TypeEntryKind::UserType { .. } | TypeEntryKind::Array { .. } => true,
			TypeEntryKind::BuiltinType { .. } | TypeEntryKind::Pointer { .. } | TypeEntryKind::Vector { .. } => false,
		}
	}

	// Integer types below register promotion width, `Some` carries signedness
	pub fn promotable_integer(self, type_store: &TypeStore) -> Option<bool> {
		let entry = type_store.type_entries[self.index()];
		let kind = match entry.kind {
			TypeEntryKind::BuiltinType { kind } => kind,
			_ => return None,
		};

		match kind {
			PrimitiveKind::Bool => Some(false),

			PrimitiveKind::Numeric(numeric) => match numeric {
				NumericKind::I8 | NumericKind::I16 => Some(true),
				NumericKind::U8 | NumericKind::U16 => Some(false),
				_ => None,
			},

			PrimitiveKind::Void => None,
		}
	}

	pub fn numeric_kind(self, type_store: &TypeStore) -> Option<NumericKind> {
		let entry = type_store.type_entries[self.index()];
		match entry.kind {
			TypeEntryKind::BuiltinType { kind: PrimitiveKind::Numeric(numeric) } => Some(numeric),
			_ => None,
		}
	}

	pub fn transparent_union_member(self, type_store: &TypeStore) -> Option<TypeId> {
		let entry = type_store.type_entries[self.index()];
		if let TypeEntryKind::UserType { shape_index } = entry.kind {
			let shape = &type_store.user_types[shape_index];
			if let UserTypeKind::Union { members, transparent: true } = &shape.kind {
				return members.first().copied();
			}
		}

		None
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
	pub size: i64,
	pub alignment: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
	I8,
	I16,
	I32,
	I64,
	I128,

	U8,
	U16,
	U32,
	U64,
	U128,

	F32,
	F64,
}

impl NumericKind {
	pub fn name(self) -> &'static str {
		match self {
			NumericKind::I8 => "i8",
			NumericKind::I16 => "i16",
			NumericKind::I32 => "i32",
			NumericKind::I64 => "i64",
			NumericKind::I128 => "i128",
			NumericKind::U8 => "u8",
			NumericKind::U16 => "u16",
			NumericKind::U32 => "u32",
			NumericKind::U64 => "u64",
			NumericKind::U128 => "u128",
			NumericKind::F32 => "f32",
			NumericKind::F64 => "f64",
		}
	}

	pub fn layout(self) -> Layout {
		match self {
			NumericKind::I8 | NumericKind::U8 => Layout { size: 1, alignment: 1 },
			NumericKind::I16 | NumericKind::U16 => Layout { size: 2, alignment: 2 },
			NumericKind::I32 | NumericKind::U32 | NumericKind::F32 => Layout { size: 4, alignment: 4 },
			NumericKind::I64 | NumericKind::U64 | NumericKind::F64 => Layout { size: 8, alignment: 8 },
			NumericKind::I128 | NumericKind::U128 => Layout { size: 16, alignment: 16 },
		}
	}

	pub fn is_signed(self) -> bool {
		match self {
			NumericKind::I8 | NumericKind::I16 | NumericKind::I32 | NumericKind::I64 | NumericKind::I128 => true,
			NumericKind::U8 | NumericKind::U16 | NumericKind::U32 | NumericKind::U64 | NumericKind::U128 => false,
			NumericKind::F32 | NumericKind::F64 => true,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
	Void,
	Bool,
	Numeric(NumericKind),
}

impl PrimitiveKind {
	pub fn layout(self) -> Layout {
		match self {
			PrimitiveKind::Void => Layout { size: 0, alignment: 1 },
			PrimitiveKind::Bool => Layout { size: 1, alignment: 1 },
			PrimitiveKind::Numeric(numeric) => numeric.layout(),
		}
	}
}

#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
	pub kind: TypeEntryKind,
}

#[derive(Debug, Clone, Copy)]
pub enum TypeEntryKind {
	BuiltinType { kind: PrimitiveKind },
	Pointer { type_id: TypeId },
	Array { element: TypeId, length: u32 },
	Vector { element: TypeId, length: u32 },
	UserType { shape_index: usize },
}

#[derive(Debug)]
pub struct UserTypeShape {
	pub kind: UserTypeKind,
	pub layout: Layout,
}

#[derive(Debug)]
pub enum UserTypeKind {
	Struct { fields: Vec<TypeId> },
	Union { members: Vec<TypeId>, transparent: bool },
}

// Types are immutable once registered so lookups never require
// synchronization, classification may read a shared store from any thread
#[derive(Debug)]
pub struct TypeStore {
	pub type_entries: Vec<TypeEntry>,
	pub user_types: Vec<UserTypeShape>,

	void_type_id: TypeId,
	bool_type_id: TypeId,

	i8_type_id: TypeId,
	i16_type_id: TypeId,
	i32_type_id: TypeId,
	i64_type_id: TypeId,
	i128_type_id: TypeId,

	u8_type_id: TypeId,
	u16_type_id: TypeId,
	u32_type_id: TypeId,
	u64_type_id: TypeId,
	u128_type_id: TypeId,

	f32_type_id: TypeId,
	f64_type_id: TypeId,
}

impl TypeStore {
	pub fn new() -> Self {
		let mut type_entries = Vec::new();

		let mut push_primitive = |kind| {
			let type_id = TypeId { entry: type_entries.len() as u32 };
			let kind = TypeEntryKind::BuiltinType { kind };
			type_entries.push(TypeEntry { kind });
			type_id
		};

		let void_type_id = push_primitive(PrimitiveKind::Void);
		let bool_type_id = push_primitive(PrimitiveKind::Bool);

		let i8_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::I8));
		let i16_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::I16));
		let i32_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::I32));
		let i64_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::I64));
		let i128_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::I128));

		let u8_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::U8));
		let u16_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::U16));
		let u32_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::U32));
		let u64_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::U64));
		let u128_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::U128));

		let f32_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::F32));
		let f64_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::F64));

		TypeStore {
			type_entries,
			user_types: Vec::new(),
			void_type_id,
			bool_type_id,
			i8_type_id,
			i16_type_id,
			i32_type_id,
			i64_type_id,
			i128_type_id,
			u8_type_id,
			u16_type_id,
			u32_type_id,
			u64_type_id,
			u128_type_id,
			f32_type_id,
			f64_type_id,
		}
	}

	pub fn void_type_id(&self) -> TypeId {
		self.void_type_id
	}

	pub fn bool_type_id(&self) -> TypeId {
		self.bool_type_id
	}

	pub fn i8_type_id(&self) -> TypeId {
		self.i8_type_id
	}

	pub fn i16_type_id(&self) -> TypeId {
		self.i16_type_id
	}

	pub fn i32_type_id(&self) -> TypeId {
		self.i32_type_id
	}

	pub fn i64_type_id(&self) -> TypeId {
		self.i64_type_id
	}

	pub fn i128_type_id(&self) -> TypeId {
		self.i128_type_id
	}

	pub fn u8_type_id(&self) -> TypeId {
		self.u8_type_id
	}

	pub fn u16_type_id(&self) -> TypeId {
		self.u16_type_id
	}

	pub fn u32_type_id(&self) -> TypeId {
		self.u32_type_id
	}

	pub fn u64_type_id(&self) -> TypeId {
		self.u64_type_id
	}

	pub fn u128_type_id(&self) -> TypeId {
		self.u128_type_id
	}

	pub fn f32_type_id(&self) -> TypeId {
		self.f32_type_id
	}

	pub fn f64_type_id(&self) -> TypeId {
		self.f64_type_id
	}

	fn push_entry(&mut self, kind: TypeEntryKind) -> TypeId {
		let type_id = TypeId { entry: self.type_entries.len() as u32 };
		self.type_entries.push(TypeEntry { kind });
		type_id
	}

	pub fn pointer_to(&mut self, type_id: TypeId) -> TypeId {
		self.push_entry(TypeEntryKind::Pointer { type_id })
	}

	pub fn array_of(&mut self, element: TypeId, length: u32) -> TypeId {
		self.push_entry(TypeEntryKind::Array { element, length })
	}

	pub fn vector_of(&mut self, element: TypeId, length: u32) -> TypeId {
		assert!(length > 0);
		self.push_entry(TypeEntryKind::Vector { element, length })
	}

	pub fn register_struct(&mut self, fields: &[TypeId]) -> TypeId {
		let layout = self.struct_layout(fields);
		let kind = UserTypeKind::Struct { fields: fields.to_vec() };
		let shape_index = self.user_types.len();
		self.user_types.push(UserTypeShape { kind, layout });
		self.push_entry(TypeEntryKind::UserType { shape_index })
	}

	pub fn register_union(&mut self, transparent: bool, members: &[TypeId]) -> TypeId {
		assert!(!transparent || !members.is_empty());

		let mut size = 0;
		let mut alignment = 1;
		for &member in members {
			let member_layout = self.type_layout(member);
			size = size.max(member_layout.size);
			alignment = alignment.max(member_layout.alignment);
		}

		let layout = Layout { size: align_to(size, alignment), alignment };
		let kind = UserTypeKind::Union { members: members.to_vec(), transparent };
		let shape_index = self.user_types.len();
		self.user_types.push(UserTypeShape { kind, layout });
		self.push_entry(TypeEntryKind::UserType { shape_index })
	}

	fn struct_layout(&self, fields: &[TypeId]) -> Layout {
		let mut size = 0;
		let mut alignment = 1;

		for &field in fields {
			let field_layout = self.type_layout(field);
			alignment = alignment.max(field_layout.alignment);
			size = align_to(size, field_layout.alignment) + field_layout.size;
		}

		Layout { size: align_to(size, alignment), alignment }
	}

	pub fn type_layout(&self, type_id: TypeId) -> Layout {
		let entry = self.type_entries[type_id.index()];
		match entry.kind {
			TypeEntryKind::BuiltinType { kind } => kind.layout(),

			// This lowering only handles 64 bit targets
			TypeEntryKind::Pointer { .. } => Layout { size: 8, alignment: 8 },

			TypeEntryKind::Array { element, length } => {
				let element_layout = self.type_layout(element);
				Layout {
					size: element_layout.size * length as i64,
					alignment: element_layout.alignment,
				}
			}

			TypeEntryKind::Vector { element, length } => {
				let size = self.type_layout(element).size * length as i64;
				Layout { size, alignment: size.min(16) }
			}

			TypeEntryKind::UserType { shape_index } => self.user_types[shape_index].layout,
		}
	}

	pub fn size_in_bits(&self, type_id: TypeId) -> u64 {
		self.type_layout(type_id).size as u64 * 8
	}

	pub fn align_in_bits(&self, type_id: TypeId) -> u32 {
		self.type_layout(type_id).alignment as u32 * 8
	}
}

pub fn align_to(value: i64, alignment: i64) -> i64 {
	assert!(alignment > 0);
	(value + alignment - 1) / alignment * alignment
}

#[test]
fn test_struct_layout() {
	let mut type_store = TypeStore::new();
	let u8_type_id = type_store.u8_type_id();
	let u32_type_id = type_store.u32_type_id();
	let u64_type_id = type_store.u64_type_id();

	let cases = [
		(vec![u8_type_id, u32_type_id], Layout { size: 8, alignment: 4 }),
		(vec![u32_type_id, u8_type_id], Layout { size: 8, alignment: 4 }),
		(vec![u8_type_id, u8_type_id, u8_type_id], Layout { size: 3, alignment: 1 }),
		(vec![u64_type_id, u8_type_id], Layout { size: 16, alignment: 8 }),
		(vec![], Layout { size: 0, alignment: 1 }),
	];

	for (fields, expected) in cases {
		let type_id = type_store.register_struct(&fields);
		let layout = type_store.type_layout(type_id);
		assert_eq!(layout, expected, "{fields:?}");
	}
}

#[test]
fn test_union_layout() {
	let mut type_store = TypeStore::new();
	let u16_type_id = type_store.u16_type_id();
	let u64_type_id = type_store.u64_type_id();

	let union_type_id = type_store.register_union(false, &[u16_type_id, u64_type_id]);
	assert_eq!(type_store.type_layout(union_type_id), Layout { size: 8, alignment: 8 });
}

#[test]
fn test_promotable_integer_queries() {
	let type_store = TypeStore::new();

	assert_eq!(type_store.i8_type_id().promotable_integer(&type_store), Some(true));
	assert_eq!(type_store.i16_type_id().promotable_integer(&type_store), Some(true));
	assert_eq!(type_store.u8_type_id().promotable_integer(&type_store), Some(false));
	assert_eq!(type_store.u16_type_id().promotable_integer(&type_store), Some(false));
	assert_eq!(type_store.bool_type_id().promotable_integer(&type_store), Some(false));

	assert_eq!(type_store.i32_type_id().promotable_integer(&type_store), None);
	assert_eq!(type_store.u64_type_id().promotable_integer(&type_store), None);
	assert_eq!(type_store.f32_type_id().promotable_integer(&type_store), None);
}

#[test]
fn test_transparent_union_member() {
	let mut type_store = TypeStore::new();
	let i32_type_id = type_store.i32_type_id();
	let u32_type_id = type_store.u32_type_id();

	let transparent = type_store.register_union(true, &[i32_type_id, u32_type_id]);
	assert_eq!(transparent.transparent_union_member(&type_store), Some(i32_type_id));

	let opaque = type_store.register_union(false, &[i32_type_id, u32_type_id]);
	assert_eq!(opaque.transparent_union_member(&type_store), None);
}
