//! Category mega-menu shown under the header's department tabs.
//!
//! The table is static; the backend owns the products behind each link.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Men,
    Women,
    Kids,
}

impl Department {
    /// Tab order in the header. `Men` is selected first.
    pub const ALL: [Self; 3] = [Self::Men, Self::Women, Self::Kids];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
            Self::Kids => "Kids",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown department '{0}' (expected men, women, or kids)")]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            "kids" => Ok(Self::Kids),
            _ => Err(UnknownDepartment(raw.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryItem {
    pub name: &'static str,
    pub href: &'static str,
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryGroup {
    pub title: &'static str,
    pub items: &'static [CategoryItem],
}

/// One department tab: banner plus clothing, shoes, and accessories columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentMenu {
    pub department: Department,
    pub image: &'static str,
    pub alt_text: &'static str,
    pub groups: [CategoryGroup; 3],
}

const fn item(name: &'static str, href: &'static str) -> CategoryItem {
    CategoryItem { name, href, featured: false }
}

const fn featured_item(name: &'static str, href: &'static str) -> CategoryItem {
    CategoryItem { name, href, featured: true }
}

static MEN: DepartmentMenu = DepartmentMenu {
    department: Department::Men,
    image: "/men-cover.webp",
    alt_text: "Men's Fashion Collection",
    groups: [
        CategoryGroup {
            title: "Clothing",
            items: &[
                featured_item("Hoodies", "/products/men/hoodies"),
                item("Sweatshirts", "/products/men/sweatshirts"),
                item("T-Shirts", "/products/men/t-shirts"),
                item("Jackets", "/products/men/jackets"),
                item("Pants", "/products/men/pants"),
            ],
        },
        CategoryGroup {
            title: "Shoes",
            items: &[
                featured_item("Running", "/products/men/running-shoes"),
                item("Sneakers", "/products/men/sneakers"),
                item("Boots", "/products/men/boots"),
            ],
        },
        CategoryGroup {
            title: "Accessories",
            items: &[
                featured_item("Bags & Backpacks", "/products/men/bags"),
                item("Watches", "/products/men/watches"),
                item("Belts", "/products/men/belts"),
            ],
        },
    ],
};

static WOMEN: DepartmentMenu = DepartmentMenu {
    department: Department::Women,
    image: "/women-cover.jpg",
    alt_text: "Women's Fashion Collection",
    groups: [
        CategoryGroup {
            title: "Clothing",
            items: &[
                featured_item("Tops", "/products/women/tops"),
                featured_item("Jeans", "/products/women/jeans"),
                item("Dresses", "/products/women/dresses"),
                item("Skirts", "/products/women/skirts"),
            ],
        },
        CategoryGroup {
            title: "Shoes",
            items: &[
                featured_item("Heels", "/products/women/heels"),
                featured_item("Flats", "/products/women/flats"),
                item("Boots", "/products/women/boots"),
            ],
        },
        CategoryGroup {
            title: "Accessories",
            items: &[
                featured_item("Handbags", "/products/women/handbags"),
                item("Jewelry", "/products/women/jewelry"),
                item("Scarves", "/products/women/scarves"),
            ],
        },
    ],
};

static KIDS: DepartmentMenu = DepartmentMenu {
    department: Department::Kids,
    image: "/kids-cover.webp",
    alt_text: "Kids' Fashion Collection",
    groups: [
        CategoryGroup {
            title: "Clothing",
            items: &[
                featured_item("T-Shirts", "/products/kids/t-shirts"),
                item("Pants", "/products/kids/pants"),
                item("Dresses", "/products/kids/dresses"),
            ],
        },
        CategoryGroup {
            title: "Shoes",
            items: &[
                featured_item("Sneakers", "/products/kids/sneakers"),
                item("Sports Shoes", "/products/kids/sports-shoes"),
            ],
        },
        CategoryGroup {
            title: "Accessories",
            items: &[
                featured_item("Hats", "/products/kids/hats"),
                item("Backpacks", "/products/kids/backpacks"),
            ],
        },
    ],
};

#[must_use]
pub fn menu(department: Department) -> &'static DepartmentMenu {
    match department {
        Department::Men => &MEN,
        Department::Women => &WOMEN,
        Department::Kids => &KIDS,
    }
}

/// Highlighted items across every group of a department, in display order.
pub fn featured(department: Department) -> impl Iterator<Item = &'static CategoryItem> {
    menu(department)
        .groups
        .iter()
        .flat_map(|group| group.items.iter())
        .filter(|item| item.featured)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
