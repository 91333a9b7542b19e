use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::ConfigError;

// The kind is fixed for the lifetime of a compilation target. Every
// classification decision for that target must flow from one kind, a call
// site may only diverge via its own calling convention value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiKind {
	Aapcs,
	DarwinPcs,
	Win64,
}

impl AbiKind {
	pub fn name(self) -> &'static str {
		match self {
			AbiKind::Aapcs => "aapcs",
			AbiKind::DarwinPcs => "darwinpcs",
			AbiKind::Win64 => "win64",
		}
	}

	// The Darwin procedure call standard widens small integers on the caller
	// side where standard AAPCS leaves them as-is
	pub fn extends_promotable_integers(self) -> bool {
		matches!(self, AbiKind::DarwinPcs)
	}

	fn parse(name: &str) -> Option<AbiKind> {
		match name {
			"aapcs" => Some(AbiKind::Aapcs),
			"darwinpcs" => Some(AbiKind::DarwinPcs),
			"win64" => Some(AbiKind::Win64),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
	Little,
	Big,
}

impl Endianness {
	fn parse(name: &str) -> Option<Endianness> {
		match name {
			"little" => Some(Endianness::Little),
			"big" => Some(Endianness::Big),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
	pub triple: String,
	pub abi_kind: AbiKind,
	pub endianness: Endianness,
	pub pointer_width_bits: u32,
}

impl TargetConfig {
	pub fn new(triple: &str, abi_kind: AbiKind, endianness: Endianness) -> TargetConfig {
		TargetConfig {
			triple: triple.to_owned(),
			abi_kind,
			endianness,
			pointer_width_bits: 64,
		}
	}
}

#[derive(Debug)]
pub struct TargetTable {
	configs: FxHashMap<String, TargetConfig>,
}

impl TargetTable {
	pub fn with_builtin_targets() -> TargetTable {
		let mut table = TargetTable { configs: FxHashMap::default() };

		table.insert(TargetConfig::new("aarch64-unknown-linux-gnu", AbiKind::Aapcs, Endianness::Little));
		table.insert(TargetConfig::new("aarch64-unknown-linux-musl", AbiKind::Aapcs, Endianness::Little));
		table.insert(TargetConfig::new("aarch64_be-unknown-linux-gnu", AbiKind::Aapcs, Endianness::Big));
		table.insert(TargetConfig::new("aarch64-apple-darwin", AbiKind::DarwinPcs, Endianness::Little));
		table.insert(TargetConfig::new("aarch64-pc-windows-msvc", AbiKind::Win64, Endianness::Little));

		table
	}

	fn insert(&mut self, config: TargetConfig) {
		self.configs.insert(config.triple.clone(), config);
	}

	// Unknown triples are a configuration error, guessing a calling
	// convention here would defeat the entire point of classification
	pub fn lookup(&self, triple: &str) -> Result<&TargetConfig, ConfigError> {
		match self.configs.get(triple) {
			Some(config) => Ok(config),
			None => Err(ConfigError::UnknownTriple(triple.to_owned())),
		}
	}

	pub fn extend_from_toml(&mut self, source: &str) -> Result<(), ConfigError> {
		let table: TomlTargetTable = match toml::from_str(source) {
			Ok(table) => table,
			Err(err) => return Err(ConfigError::MalformedTable(err.to_string())),
		};

		for entry in table.target {
			let Some(abi_kind) = AbiKind::parse(&entry.abi) else {
				return Err(ConfigError::UnknownAbiKind(entry.abi));
			};

			let Some(endianness) = Endianness::parse(&entry.endian) else {
				return Err(ConfigError::UnknownEndianness(entry.endian));
			};

			let pointer_width_bits = entry.pointer_width.unwrap_or(64);
			self.insert(TargetConfig {
				triple: entry.triple,
				abi_kind,
				endianness,
				pointer_width_bits,
			});
		}

		Ok(())
	}
}

#[derive(Debug, Deserialize)]
struct TomlTargetTable {
	#[serde(default)]
	target: Vec<TomlTarget>,
}

#[derive(Debug, Deserialize)]
struct TomlTarget {
	triple: String,
	abi: String,
	endian: String,
	pointer_width: Option<u32>,
}
