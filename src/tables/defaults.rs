//! Built-in lookup tables.
//!
//! Compile-time maps for the directory's known employees, job titles and
//! provinces. They seed [`super::LookupTables`] and can be replaced table by
//! table from the configuration file.

use phf::phf_map;

/// Arabic full name to English transliteration.
pub static NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "خالد الزهراني" => "Khalid Al Zahrani",
    "أحمد الحربي" => "Ahmad Al Harbi",
    "فهد السحيباني" => "Fahad Al Suhibani",
    "محمد الغامدي" => "Muhammad Al Ghamdi",
    "ضيف الله العمراني" => "Dhaifallah Al Omrani",
    "سلمان البلوي" => "Salman Al Balawi",
    "عدنان المطوع" => "Adnan Al Mutawa",
    "عبدالله السبيعي" => "Abdullah Al Subai",
    "سعيد القاضي" => "Saeed Al Qadi",
    "خالد القحطاني" => "Khalid Al Qahtani",
    "عبدالله السحيمي" => "Abdullah Al Saihmi",
    "عبدالرحمن الحيدري" => "Abdulrahman Al Haidari",
    "حسين عتودي" => "Hussein Atoudi",
    "محمد نجمي" => "Muhammad Najmi",
    "عبدالله النصر" => "Abdullah Al Nasser",
    "عبدالرحمن الرباعي" => "Abdulrahman Al Rubai",
    "فيصل الغامدي" => "Faisal Al Ghamdi",
    "سلطان الشمري" => "Sultan Al Shammari",
    "سلطان القحطاني" => "Sultan Al Qahtani",
};

/// Arabic job title to English title.
pub static TITLES: phf::Map<&'static str, &'static str> = phf_map! {
    "مستشار" => "Consultant",
    "مهندس خبير" => "Senior Engineer",
    "كبير مهندسين" => "Chief Engineer",
    "مهندس محترف" => "Professional Engineer",
    "منسق إقليمي" => "Regional Coordinator",
    "ضابط علاقات عامة" => "Public Relations Officer",
    "مهندس نظم" => "Systems Engineer",
    "محلل أعمال" => "Business Analyst",
    "مدير عمليات" => "Operations Manager",
    "محللة مالية" => "Financial Analyst",
    "مهندس شبكات" => "Network Engineer",
    "مديرة موارد بشرية" => "HR Manager",
    "محلل نظم" => "Systems Analyst",
    "مديرة الموردين" => "Vendor Manager",
    "محلل بيانات" => "Data Analyst",
    "أمير النعيمي" => "Amira Al Naimi",
    "مهندسة برمجيات" => "Software Engineer",
    "مدير مشاريع" => "Project Manager",
    "أخصائية تسويق" => "Marketing Specialist",
    "مصممة جرافيك" => "Graphic Designer",
    "مدير مبيعات" => "Sales Manager",
    "ضمان الجودة" => "Quality Assurance",
};

/// Province as written in the spreadsheet to `(region code, English name)`.
///
/// Al Madinah appears both with and without the "منطقة" prefix.
pub static PROVINCES: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    "منطقة مكة المكرمة" => ("SA-02", "Makkah Region"),
    "المدينة المنورة" => ("SA-03", "Al Madinah"),
    "منطقة المدينة المنورة" => ("SA-03", "Al Madinah"),
    "المنطقة الشرقية" => ("SA-04", "Eastern Province"),
    "منطقة القصيم" => ("SA-05", "Al Qassim Region"),
    "منطقة حائل" => ("SA-06", "Hail Region"),
    "منطقة تبوك" => ("SA-07", "Tabuk Region"),
    "منطقة الحدود الشمالية" => ("SA-08", "Northern Borders Region"),
    "منطقة جازان" => ("SA-09", "Jazan Region"),
    "منطقة نجران" => ("SA-10", "Najran Region"),
    "منطقة الباحة" => ("SA-11", "Al Bahah Region"),
    "منطقة الجوف" => ("SA-12", "Al Jouf Region"),
    "منطقة عسير" => ("SA-14", "Asir Region"),
};

/// Arabic full name to a fragment of the employee's photo filename.
pub static PHOTO_HINTS: phf::Map<&'static str, &'static str> = phf_map! {
    "خالد الزهراني" => "khalid",
    "أحمد الحربي" => "ahmed",
    "فهد السحيباني" => "fahad_alsuhibani",
    "محمد الغامدي" => "muhammad",
    "ضيف الله العمراني" => "daifallah_alomrani",
    "سلمان البلوي" => "salman_albalawi",
    "عدنان المطوع" => "adnan_almutawa",
    "عبدالله السبيعي" => "abdullah_alsubaie",
    "سعيد القاضي" => "saeed_alqadi",
    "خالد القحطاني" => "khalid_alqahtani",
    "عبدالله السحيمي" => "sultan_alsahmmari",
    "عبدالرحمن الحيدري" => "abdulrahman_alhaidari",
    "حسين عتودي" => "hussain",
    "محمد نجمي" => "muhammad_najmi",
    "عبدالله النصر" => "abdullah_alnaser",
    "عبدالرحمن الرباعي" => "abdulrahman_alrubai",
    "فيصل الغامدي" => "faisal",
    "سلطان الشمري" => "sultan_alshmmari",
    "سلطان القحطاني" => "sultan_alqahtani",
    "عبدالرحمن العرابي" => "abdulrahman_alarabiae",
    "وليد النفيعي" => "waleed_alnufaii",
};
