//! Per-type member descriptor tables.
//!
//! Each settings type declares a `static` list of [`MemberDescriptor`]s, one
//! per copyable member. The graph copier and the codec are driven entirely by
//! these tables; there is no runtime type introspection.

/// Classifies how a member is copied.
///
/// Leaf members are transferred by direct value assignment. Composite members
/// are recursed into, matching their own descriptor tables on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Leaf,
    Composite,
}

/// A single enumerable member of a settings type.
///
/// `no_copy` and `no_serialize` are two independent exclusion flags: the
/// first hides the member from the graph copier, the second from the
/// serialized file. A member can carry one, the other, or both.
#[derive(Clone, Copy, Debug)]
pub struct MemberDescriptor {
    pub name: &'static str,
    pub readable: bool,
    pub writable: bool,
    pub no_copy: bool,
    pub no_serialize: bool,
    /// Marks a member backed by a non-trivial accessor. Such members are
    /// excluded from serialization unless the loader opts in.
    pub custom_accessor: bool,
    pub kind: MemberKind,
}

impl MemberDescriptor {
    pub const fn leaf(name: &'static str) -> Self {
        Self {
            name,
            readable: true,
            writable: true,
            no_copy: false,
            no_serialize: false,
            custom_accessor: false,
            kind: MemberKind::Leaf,
        }
    }

    pub const fn composite(name: &'static str) -> Self {
        Self {
            kind: MemberKind::Composite,
            ..Self::leaf(name)
        }
    }

    pub const fn no_copy(mut self) -> Self {
        self.no_copy = true;
        self
    }

    pub const fn no_serialize(mut self) -> Self {
        self.no_serialize = true;
        self
    }

    pub const fn custom_accessor(mut self) -> Self {
        self.custom_accessor = true;
        self
    }

    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub const fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    /// Whether the member belongs in the serialized file.
    pub fn serialized(&self, allow_custom_accessors: bool) -> bool {
        !self.no_serialize && (allow_custom_accessors || !self.custom_accessor)
    }
}

/// Look up a descriptor by member name.
pub fn find<'a>(
    descriptors: &'a [MemberDescriptor],
    name: &str,
) -> Option<&'a MemberDescriptor> {
    descriptors.iter().find(|d| d.name == name)
}
