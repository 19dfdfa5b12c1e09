//! # Seed Data
//!
//! The demo data set the back-office starts with.
//!
//! ## Contents
//! - Six catalog parts (`PART-001`..`PART-006`)
//! - Four bookings (`BOOK-101`..`BOOK-104`)
//! - A five-person roster with 30 days of attendance ending today
//! - This month's and last month's running expenses
//! - 90 days of sale history ending today
//!
//! Everything date-relative is generated from `today` with fixed patterns,
//! so the same day always produces the same data.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::Serialize;
use workshop_core::{
    AttendanceRecord, AttendanceStatus, Booking, BookingStatus, Employee, Expense, ExpenseCategory, Part,
    PartCategory, SaleRecord, ServiceCategory, ServiceOffering, ServiceType,
};

/// Days of attendance generated, today included.
pub const ATTENDANCE_DAYS: i64 = 30;

/// Days of sale history generated, today included.
pub const SALES_DAYS: i64 = 90;

/// Full seed set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub parts: Vec<Part>,
    pub bookings: Vec<Booking>,
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub expenses: Vec<Expense>,
    pub sales: Vec<SaleRecord>,
}

impl SeedData {
    pub fn generate(today: NaiveDate) -> Self {
        let parts = parts();
        let employees = employees();
        SeedData {
            attendance: attendance(&employees, today),
            sales: sales(&parts, today),
            expenses: expenses(today),
            bookings: bookings(),
            parts,
            employees,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// (id, name, category, mrp paise, selling paise, stock, unsplash photo id, hint)
const PARTS: &[(&str, &str, PartCategory, i64, i64, i64, &str, &str)] = &[
    (
        "PART-001",
        "Air Filter Assembly",
        PartCategory::Filters,
        75_000,
        72_000,
        15,
        "photo-1616237225529-67a423329d43",
        "motorcycle air filter",
    ),
    (
        "PART-002",
        "Clutch Cable",
        PartCategory::Drivetrain,
        35_050,
        33_000,
        25,
        "photo-1600863001099-a6a1a153d605",
        "motorcycle clutch cable",
    ),
    (
        "PART-003",
        "Brake Pad Set - Front",
        PartCategory::Brakes,
        90_000,
        85_000,
        3,
        "photo-1609934449767-12b2a6081c5f",
        "motorcycle brake pad",
    ),
    (
        "PART-004",
        "Engine Oil (1L)",
        PartCategory::Lubricants,
        120_000,
        115_000,
        50,
        "photo-1632386915228-9356d226a655",
        "motorcycle engine oil",
    ),
    (
        "PART-005",
        "Spark Plug",
        PartCategory::Electrical,
        25_000,
        24_000,
        40,
        "photo-1622286392398-690a69365c71",
        "motorcycle spark plug",
    ),
    (
        "PART-006",
        "Chain & Sprocket Kit",
        PartCategory::Drivetrain,
        350_000,
        335_000,
        8,
        "photo-1593356173010-85d1942a6c47",
        "motorcycle chain sprocket",
    ),
];

pub fn parts() -> Vec<Part> {
    PARTS
        .iter()
        .map(|&(id, name, category, mrp, selling, stock, photo, hint)| Part {
            id: id.to_string(),
            name: name.to_string(),
            category,
            mrp_paise: mrp,
            selling_price_paise: selling,
            stock,
            image: format!("https://images.unsplash.com/{}?fit=max&fm=jpg&q=80&w=1080", photo),
            image_hint: hint.to_string(),
        })
        .collect()
}

// =============================================================================
// Bookings
// =============================================================================

pub fn bookings() -> Vec<Booking> {
    let rows = [
        ("BOOK-101", "Amit Kumar", "+91 98765 43210", ServiceType::RegularServicing, 1, BookingStatus::Completed),
        ("BOOK-102", "Sunita Sharma", "+91 87654 32109", ServiceType::EngineWork, 2, BookingStatus::InProgress),
        ("BOOK-103", "Rajesh Verma", "+91 76543 21098", ServiceType::OilChange, 5, BookingStatus::Pending),
        ("BOOK-104", "Priya Singh", "+91 65432 10987", ServiceType::CustomModifications, 6, BookingStatus::Pending),
    ];

    rows.into_iter()
        .filter_map(|(id, name, phone, service, day, status)| {
            Some(Booking {
                id: id.to_string(),
                customer_name: name.to_string(),
                customer_phone: phone.to_string(),
                service,
                date: NaiveDate::from_ymd_opt(2024, 8, day)?,
                status,
                message: None,
            })
        })
        .collect()
}

// =============================================================================
// Staff
// =============================================================================

pub fn employees() -> Vec<Employee> {
    [
        ("EMP-001", "Ramesh Yadav", "Senior Mechanic"),
        ("EMP-002", "Sunil Kumar", "Mechanic"),
        ("EMP-003", "Manoj Singh", "Auto Electrician"),
        ("EMP-004", "Pooja Kumari", "Front Desk"),
        ("EMP-005", "Arjun Prasad", "Apprentice"),
    ]
    .into_iter()
    .map(|(id, name, role)| Employee {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
    })
    .collect()
}

const LEAVE_REASONS: &[&str] = &["Family function", "Medical appointment", "Festival travel"];

/// One record per employee per day. Roughly one day in eleven is an
/// absence and one in eleven is leave; everything else is Present with an
/// entry time between 09:10 and 09:50.
pub fn attendance(employees: &[Employee], today: NaiveDate) -> Vec<AttendanceRecord> {
    let mut records = Vec::new();

    for offset in 0..ATTENDANCE_DAYS {
        let date = today - Duration::days(offset);
        for (n, employee) in employees.iter().enumerate() {
            let pattern = (offset as usize * 3 + n * 7) % 11;
            let (status, entry_time, reason) = match pattern {
                0 => (AttendanceStatus::Absent, None, None),
                1 => (
                    AttendanceStatus::OnLeave,
                    None,
                    Some(LEAVE_REASONS[(offset as usize + n) % LEAVE_REASONS.len()].to_string()),
                ),
                minutes => (
                    AttendanceStatus::Present,
                    NaiveTime::from_hms_opt(9, (minutes as u32 - 2) * 5 + 10, 0),
                    None,
                ),
            };

            records.push(AttendanceRecord {
                id: format!("ATT-{}-{}", date.format("%Y%m%d"), n + 1),
                employee_id: employee.id.clone(),
                date,
                status,
                entry_time,
                reason,
            });
        }
    }

    records
}

// =============================================================================
// Money
// =============================================================================

/// Monthly running costs for this month and last month, dated inside each
/// month and never after today.
pub fn expenses(today: NaiveDate) -> Vec<Expense> {
    let this_month = today.with_day(1).unwrap_or(today);
    let last_month = (this_month - Duration::days(1)).with_day(1).unwrap_or(this_month);

    let monthly = [
        ("Workshop rent", ExpenseCategory::Rent, 1_500_000, 1),
        ("Staff salaries", ExpenseCategory::Salary, 6_000_000, 1),
        ("Electricity bill", ExpenseCategory::Utilities, 320_050, 5),
        ("Pamphlet printing", ExpenseCategory::Marketing, 200_000, 10),
        ("Tea and cleaning supplies", ExpenseCategory::Miscellaneous, 85_000, 15),
    ];

    let mut out = Vec::new();
    let mut n = 1;
    for month_start in [last_month, this_month] {
        for (name, category, amount, day) in monthly {
            let date = month_start.with_day(day).unwrap_or(month_start);
            if date > today {
                continue;
            }
            out.push(Expense {
                id: format!("EXP-{:03}", n),
                name: name.to_string(),
                category,
                amount_paise: amount,
                date,
            });
            n += 1;
        }
    }
    out
}

/// Sale history: part `i` sells on every `(i + 2)`th day, 1..=3 units at
/// its current selling price.
pub fn sales(parts: &[Part], today: NaiveDate) -> Vec<SaleRecord> {
    let mut out = Vec::new();

    for offset in 0..SALES_DAYS {
        let date = today - Duration::days(offset);
        for (i, part) in parts.iter().enumerate() {
            let day = offset as usize;
            if (day + i * 3) % (i + 2) != 0 {
                continue;
            }
            out.push(SaleRecord {
                id: format!("SALE-{}-{}", date.format("%Y%m%d"), part.id),
                product_id: part.id.clone(),
                quantity: 1 + ((day + i) % 3) as i64,
                unit_price_paise: part.selling_price_paise,
                date,
            });
        }
    }

    out
}

// =============================================================================
// Public Service Catalog
// =============================================================================

const SERVICE_CATALOG: &[(&str, &[(&str, &str)])] = &[
    (
        "General Service",
        &[
            ("Basic Service", "Includes oil change, thorough cleaning, and a comprehensive brake check to ensure safety."),
            ("Premium Service", "A full-vehicle inspection combined with an engine tune-up for optimal performance."),
            ("Annual Maintenance", "A complete, once-a-year service that covers all essential checks and maintenance."),
        ],
    ),
    (
        "Engine & Transmission",
        &[
            ("Engine Overhaul", "Complete engine rebuild and restoration to factory specifications for peak power."),
            ("Clutch & Gearbox Repair", "Expert repair and replacement for clutch assemblies and gearbox components."),
            ("Oil Change & Filter Replacement", "Premium oil and genuine filters to enhance engine life and efficiency."),
        ],
    ),
    (
        "Electrical & Wiring",
        &[
            ("Battery Replacement", "Testing and replacement with high-quality, long-lasting batteries."),
            ("Wiring Check & Repair", "Comprehensive diagnosis and repair of all electrical wiring and components."),
            ("Lighting Replacement", "Installation and alignment of lighting systems for maximum visibility."),
            ("Ignition Repair", "Troubleshooting and repair of ignition systems for reliable starting."),
        ],
    ),
    (
        "Brakes & Suspension",
        &[
            ("Brake Pad Replacement", "High-quality brake pad installation for reliable and safe stopping power."),
            ("Brake Disc Replacement", "Inspection and replacement of brake discs for optimal braking performance."),
            ("Shock Absorber Service", "Restore ride comfort and handling with our suspension services."),
            ("Brake Fluid Replacement", "Flushing and replacing brake fluid to ensure system integrity."),
        ],
    ),
    (
        "Tyres & Wheels",
        &[
            ("Tyre Replacement", "Wide range of quality tyres with professional fitting services."),
            ("Tube Replacement", "Quick and reliable puncture repair and tube replacement."),
            ("Wheel Balancing & Alignment", "Precision wheel balancing and alignment for a smooth ride."),
        ],
    ),
    (
        "Customization & Accessories",
        &[
            ("Exhaust Modification", "Custom exhaust solutions for improved performance and a unique sound."),
            ("Seat Customization", "Tailor-made seats for enhanced comfort and style on long rides."),
            ("Paint & Decals", "Custom paint jobs and decal application to make your bike truly yours."),
            ("Handlebar/Grip Upgrade", "Ergonomic and stylish handlebar and grip options for better control."),
        ],
    ),
];

/// Service groups shown on the public services page.
pub fn service_catalog() -> Vec<ServiceCategory> {
    SERVICE_CATALOG
        .iter()
        .map(|(title, services)| ServiceCategory {
            title: title.to_string(),
            services: services
                .iter()
                .map(|(name, description)| ServiceOffering {
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .collect(),
        })
        .collect()
}
