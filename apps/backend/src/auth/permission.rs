//! Fixed permission strings and their type-level markers.

/// Permission strings this API checks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ReadDrinkDetail,
    CreateDrinks,
    UpdateDrinks,
    DeleteDrinks,
}

impl Permission {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadDrinkDetail => "get:drinks-detail",
            Self::CreateDrinks => "post:drinks",
            Self::UpdateDrinks => "patch:drinks",
            Self::DeleteDrinks => "delete:drinks",
        }
    }
}

/// Binds a marker type to the permission an extractor must enforce.
pub trait RequiredPermission: 'static {
    const PERMISSION: Permission;
}

macro_rules! permission_marker {
    ($(#[$meta:meta])* $name:ident => $perm:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl RequiredPermission for $name {
            const PERMISSION: Permission = Permission::$perm;
        }
    };
}

permission_marker!(
    /// `get:drinks-detail`
    ReadDrinkDetail => ReadDrinkDetail
);
permission_marker!(
    /// `post:drinks`
    CreateDrinks => CreateDrinks
);
permission_marker!(
    /// `patch:drinks`
    UpdateDrinks => UpdateDrinks
);
permission_marker!(
    /// `delete:drinks`
    DeleteDrinks => DeleteDrinks
);
