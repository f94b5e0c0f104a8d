//! Permission roles as a fixed-width bit-set

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit-set of backend permission roles.
///
/// Six atomic bits per resource type (list, create, read, put, patch, delete)
/// in the backend's declaration order, then `ROLE_HOST_UPLOAD` and `ROLE_USER`.
/// The `_MANAGE` and top-level roles are precomputed unions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ApiRoles(pub u128);

/// Mask of one type's six atomic bits, starting at `shift`.
const fn family(shift: u32) -> u128 {
    0b11_1111 << shift
}

macro_rules! roles {
    ($($name:ident = $value:expr;)*) => {
        impl ApiRoles {
            $(pub const $name: ApiRoles = ApiRoles($value);)*

            const NAMED: &'static [(&'static str, ApiRoles)] =
                &[$((stringify!($name), ApiRoles::$name)),*];
        }
    };
}

roles! {
    ROLE_CLIENT_GET_LIST = 1 << 0;
    ROLE_CLIENT_POST = 1 << 1;
    ROLE_CLIENT_GET_ITEM = 1 << 2;
    ROLE_CLIENT_PUT = 1 << 3;
    ROLE_CLIENT_PATCH = 1 << 4;
    ROLE_CLIENT_DELETE = 1 << 5;

    ROLE_HOST_GET_LIST = 1 << 6;
    ROLE_HOST_POST = 1 << 7;
    ROLE_HOST_GET_ITEM = 1 << 8;
    ROLE_HOST_PUT = 1 << 9;
    ROLE_HOST_PATCH = 1 << 10;
    ROLE_HOST_DELETE = 1 << 11;

    ROLE_HOST_VULN_GET_LIST = 1 << 12;
    ROLE_HOST_VULN_POST = 1 << 13;
    ROLE_HOST_VULN_GET_ITEM = 1 << 14;
    ROLE_HOST_VULN_PUT = 1 << 15;
    ROLE_HOST_VULN_PATCH = 1 << 16;
    ROLE_HOST_VULN_DELETE = 1 << 17;

    ROLE_IMPACT_GET_LIST = 1 << 18;
    ROLE_IMPACT_POST = 1 << 19;
    ROLE_IMPACT_GET_ITEM = 1 << 20;
    ROLE_IMPACT_PUT = 1 << 21;
    ROLE_IMPACT_PATCH = 1 << 22;
    ROLE_IMPACT_DELETE = 1 << 23;

    ROLE_MISSION_GET_LIST = 1 << 24;
    ROLE_MISSION_POST = 1 << 25;
    ROLE_MISSION_GET_ITEM = 1 << 26;
    ROLE_MISSION_PUT = 1 << 27;
    ROLE_MISSION_PATCH = 1 << 28;
    ROLE_MISSION_DELETE = 1 << 29;

    ROLE_MISSION_TYPE_GET_LIST = 1 << 30;
    ROLE_MISSION_TYPE_POST = 1 << 31;
    ROLE_MISSION_TYPE_GET_ITEM = 1 << 32;
    ROLE_MISSION_TYPE_PUT = 1 << 33;
    ROLE_MISSION_TYPE_PATCH = 1 << 34;
    ROLE_MISSION_TYPE_DELETE = 1 << 35;

    ROLE_NEGATIVE_POINT_GET_LIST = 1 << 36;
    ROLE_NEGATIVE_POINT_POST = 1 << 37;
    ROLE_NEGATIVE_POINT_GET_ITEM = 1 << 38;
    ROLE_NEGATIVE_POINT_PUT = 1 << 39;
    ROLE_NEGATIVE_POINT_PATCH = 1 << 40;
    ROLE_NEGATIVE_POINT_DELETE = 1 << 41;

    ROLE_POSITIVE_POINT_GET_LIST = 1 << 42;
    ROLE_POSITIVE_POINT_POST = 1 << 43;
    ROLE_POSITIVE_POINT_GET_ITEM = 1 << 44;
    ROLE_POSITIVE_POINT_PUT = 1 << 45;
    ROLE_POSITIVE_POINT_PATCH = 1 << 46;
    ROLE_POSITIVE_POINT_DELETE = 1 << 47;

    ROLE_STEP_GET_LIST = 1 << 48;
    ROLE_STEP_POST = 1 << 49;
    ROLE_STEP_GET_ITEM = 1 << 50;
    ROLE_STEP_PUT = 1 << 51;
    ROLE_STEP_PATCH = 1 << 52;
    ROLE_STEP_DELETE = 1 << 53;

    ROLE_USER_GET_LIST = 1 << 54;
    ROLE_USER_POST = 1 << 55;
    ROLE_USER_GET_ITEM = 1 << 56;
    ROLE_USER_PUT = 1 << 57;
    ROLE_USER_PATCH = 1 << 58;
    ROLE_USER_DELETE = 1 << 59;

    ROLE_VULN_GET_LIST = 1 << 60;
    ROLE_VULN_POST = 1 << 61;
    ROLE_VULN_GET_ITEM = 1 << 62;
    ROLE_VULN_PUT = 1 << 63;
    ROLE_VULN_PATCH = 1 << 64;
    ROLE_VULN_DELETE = 1 << 65;

    ROLE_VULN_TYPE_GET_LIST = 1 << 66;
    ROLE_VULN_TYPE_POST = 1 << 67;
    ROLE_VULN_TYPE_GET_ITEM = 1 << 68;
    ROLE_VULN_TYPE_PUT = 1 << 69;
    ROLE_VULN_TYPE_PATCH = 1 << 70;
    ROLE_VULN_TYPE_DELETE = 1 << 71;

    ROLE_HOST_UPLOAD = 1 << 72;
    ROLE_USER = 1 << 73;

    ROLE_CLIENT_MANAGE = family(0);
    ROLE_HOST_MANAGE = family(6) | 1 << 72;
    ROLE_HOST_VULN_MANAGE = family(12);
    ROLE_IMPACT_MANAGE = family(18);
    ROLE_MISSION_MANAGE = family(24);
    ROLE_MISSION_TYPE_MANAGE = family(30);
    ROLE_NEGATIVE_POINT_MANAGE = family(36);
    ROLE_POSITIVE_POINT_MANAGE = family(42);
    ROLE_STEP_MANAGE = family(48);
    ROLE_USER_MANAGE = family(54);
    ROLE_VULN_MANAGE = family(60);
    ROLE_VULN_TYPE_MANAGE = family(66);

    ROLE_CLIENT = 1 << 26;

    ROLE_MANAGER = ApiRoles::ROLE_CLIENT.0
        | ApiRoles::ROLE_CLIENT_MANAGE.0
        | ApiRoles::ROLE_MISSION_MANAGE.0
        | ApiRoles::ROLE_HOST_UPLOAD.0
        | ApiRoles::ROLE_USER_MANAGE.0;

    ROLE_PENTESTER = ApiRoles::ROLE_CLIENT.0
        | ApiRoles::ROLE_MISSION_GET_ITEM.0
        | ApiRoles::ROLE_MISSION_GET_LIST.0
        | ApiRoles::ROLE_MISSION_PATCH.0
        | ApiRoles::ROLE_MISSION_PUT.0
        | ApiRoles::ROLE_STEP_MANAGE.0
        | ApiRoles::ROLE_USER_GET_ITEM.0
        | ApiRoles::ROLE_USER_GET_LIST.0
        | ApiRoles::ROLE_USER_PATCH.0
        | ApiRoles::ROLE_USER_PUT.0
        | ApiRoles::ROLE_IMPACT_GET_LIST.0
        | ApiRoles::ROLE_VULN_MANAGE.0
        | ApiRoles::ROLE_VULN_TYPE_MANAGE.0
        | ApiRoles::ROLE_HOST_VULN_MANAGE.0
        | ApiRoles::ROLE_HOST_UPLOAD.0;

    ROLE_ADMIN = ApiRoles::ROLE_PENTESTER.0
        | ApiRoles::ROLE_MANAGER.0
        | ApiRoles::ROLE_CLIENT.0
        | ApiRoles::ROLE_CLIENT_MANAGE.0
        | ApiRoles::ROLE_HOST_MANAGE.0
        | ApiRoles::ROLE_IMPACT_MANAGE.0
        | ApiRoles::ROLE_MISSION_MANAGE.0
        | ApiRoles::ROLE_MISSION_TYPE_MANAGE.0
        | ApiRoles::ROLE_NEGATIVE_POINT_MANAGE.0
        | ApiRoles::ROLE_POSITIVE_POINT_MANAGE.0
        | ApiRoles::ROLE_VULN_MANAGE.0
        | ApiRoles::ROLE_VULN_TYPE_MANAGE.0;
}

/// Resource families in bit order, paired with their display label.
pub const FAMILIES: [&str; 12] = [
    "client",
    "host",
    "host_vuln",
    "impact",
    "mission",
    "mission_type",
    "negative_point",
    "positive_point",
    "step",
    "user",
    "vuln",
    "vuln_type",
];

/// What a role set allows on one resource family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions {
    pub list: bool,
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub patch: bool,
    pub delete: bool,
}

impl ApiRoles {
    pub const NONE: ApiRoles = ApiRoles(0);

    /// Resolve a role by its backend name, atomic or aggregate.
    pub fn from_name(name: &str) -> Option<ApiRoles> {
        Self::NAMED
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, role)| *role)
    }

    /// Whether every bit of `other` is set.
    pub fn contains(self, other: ApiRoles) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Per-family summary, in bit order.
    pub fn permissions(self) -> Vec<(&'static str, Permissions)> {
        FAMILIES
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let bits = (self.0 >> (index * 6)) & 0b11_1111;
                let perms = Permissions {
                    list: bits & 1 != 0,
                    create: bits & (1 << 1) != 0,
                    read: bits & (1 << 2) != 0,
                    update: bits & (1 << 3) != 0,
                    patch: bits & (1 << 4) != 0,
                    delete: bits & (1 << 5) != 0,
                };
                (*label, perms)
            })
            .collect()
    }
}

impl BitOr for ApiRoles {
    type Output = ApiRoles;

    fn bitor(self, rhs: ApiRoles) -> ApiRoles {
        ApiRoles(self.0 | rhs.0)
    }
}

impl BitOrAssign for ApiRoles {
    fn bitor_assign(&mut self, rhs: ApiRoles) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ApiRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
