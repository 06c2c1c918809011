//! Unit definitions - ~150 units and constants organized by category
//!
//! Every entry is a name and the expression that defines it in terms of
//! other names. Entries may refer to units defined later in the table; the
//! engine resolves them iteratively at startup.

/// A named unit and its defining expression
pub type UnitDefinition = (&'static str, &'static str);

/// Textual unit definitions, resolved against the base units at startup
pub static UNIT_DEFINITIONS: &[UnitDefinition] = &[
    // Length
    ("mm", "1e-3 m"),
    ("km", "1e3 m"),
    ("cm", "1e-2 m"),
    ("um", "1e-6 m"),
    ("nm", "1e-9 m"),
    ("ft", "0.3048 m"),
    ("feet", "ft"),
    ("in", "1 / 12 ft"),
    ("inch", "in"),
    ("mil", "0.001 in"),
    ("inches", "in"),
    ("yd", "3 ft"),
    ("cubit", "18 in"),
    ("mi", "5280 ft"),
    ("mile", "mi"),
    ("miles", "mi"),

    // Area
    ("acre", "1 / 640 * mi^2"),

    // Speed
    ("mph", "mile/hour"),
    ("mps", "m/s"),
    ("fps", "ft/sec"),
    ("kph", "km/hr"),
    ("knot", "1.852 mph"),

    // Volume
    ("cc", "cm^3"),
    ("floz", "1 / 20 pint"),
    ("pint", "2 cup"),
    ("cup", "1 / 16 gallon"),
    ("quart", "2 pint"),
    ("gallon", "gal"),
    ("gal", "231 in^3"),
    ("L", "1e-3 m^3"),
    ("mL", "1e-3 L"),

    // Mass
    ("lb", "0.45359237 kg"),
    ("lbs", "lb"),
    ("lbm", "lb"),
    ("gm", "0.001 kg"),
    ("oz", "1/16 lb"),
    ("ton", "2000 lb"),

    // Force
    ("N", "1 kg * m / s^2"),
    ("kN", "1e3 N"),
    ("lbf", "lb * g"),

    // Energy
    ("J", "1 N * m"),
    ("mJ", "1e-3 J"),
    ("kJ", "1e3 J"),
    ("MJ", "1e6 J"),
    ("GJ", "1e9 J"),
    ("Btu", "1055.06 J"),
    ("btu", "Btu"),
    ("BTU", "Btu"),

    // Power
    ("W", "1 J / s"),
    ("mW", "1e-3 W"),
    ("kW", "1e3 W"),
    ("MW", "1e6 W"),
    ("GW", "1e9 W"),
    ("hp", "75 kg * g * 1m / (1s)"),

    // Pressure
    ("Pa", "N / m^2"),
    ("kPa", "1e3 Pa"),
    ("MPa", "1e6 Pa"),
    ("GPa", "1e9 Pa"),
    ("psi", "lbf / in^2"),
    ("ksi", "1e3 psi"),
    ("atm", "101325 Pa"),
    ("cmHg", "10 mmHg"),
    ("mmHg", "133.322387415 Pa"),
    ("Torr", "1 / 760 atm"),
    ("bar", "100 kPa"),
    ("mbar", "0.001 bar"),

    // Charge
    ("C", "A * s"),

    // Capacitance
    ("F", "C / V"),
    ("mF", "1e-3 F"),
    ("uF", "1e-6 F"),
    ("nF", "1e-9 F"),
    ("pF", "1e-12 F"),

    // Resistance
    ("Ohm", "V / A"),
    ("uOhm", "1e-6 Ohm"),
    ("mOhm", "1e-3 Ohm"),
    ("kOhm", "1e3 Ohm"),
    ("MOhm", "1e6 Ohm"),

    // Inductance
    ("H", "Ohm * s"),
    ("mH", "1e-3 H"),
    ("uH", "1e-6 H"),
    ("nH", "1e-9 H"),

    // Current
    ("mA", "1e-3 A"),
    ("uA", "1e-6 A"),
    ("nA", "1e-9 A"),
    ("pA", "1e-12 A"),

    // Voltage
    ("V", "W / A"),
    ("kV", "1e3 V"),
    ("MV", "1e6 V"),
    ("mV", "1e-3 V"),
    ("uV", "1e-6 V"),
    ("nV", "1e-9 V"),
    ("pV", "1e-12 V"),

    // Density
    ("pcf", "lb / ft^3"),

    // Frequency
    ("Hz", "1 / s"),
    ("kHz", "1e3 Hz"),
    ("MHz", "1e6 Hz"),
    ("GHz", "1e9 Hz"),

    // Time
    ("sec", "s"),
    ("ms", "1e-3 s"),
    ("us", "1e-6 s"),
    ("ns", "1e-9 s"),
    ("ps", "1e-12 s"),
    ("min", "60 s"),
    ("hr", "hour"),
    ("hour", "60 min"),
    ("day", "24 hour"),
    ("week", "7 day"),
    ("year", "365.2425 day"),
    ("month", "(1 year) / 12"),

    // Data
    ("bytes", "byte"),
    ("bit", "(1 / 8) byte"),
    ("bits", "bit"),
    ("kB", "1e3 byte"),
    ("MB", "1e6 byte"),
    ("GB", "1e9 byte"),
    ("TB", "1e12 byte"),
    ("kbit", "1e3 bit"),
    ("Mbit", "1e6 bit"),
    ("Gbit", "1e9 bit"),
    ("Tbit", "1e12 bit"),

    // Data rate
    ("bps", "bit / s"),
    ("kbps", "kbit / s"),
    ("Mbps", "Mbit / s"),
    ("Gbps", "Gbit / s"),
    ("Tbps", "Tbit / s"),
    ("Bps", "byte / s"),
    ("kBps", "kB / s"),
    ("MBps", "MB / s"),
    ("GBps", "GB / s"),
    ("TBps", "TB / s"),

    // Constants
    ("c", "299792458 m/s"),
    ("g", "9.80665 m/s^2"),
    ("pi", "3.141592653589793238462643383279502884197169399375105820974"),
    ("e", "2.7182818284590452353602874713526624977572470936999595749669"),
];

/// Preferred display unit per dimension: (unit expression, measure label)
pub static NATURAL_UNITS: &[UnitDefinition] = &[
    ("N", "force"),
    ("W", "power"),
    ("J", "energy"),
    ("m", "length"),
    ("kg", "mass"),
    ("s", "time"),
    ("A", "current"),
    ("K", "temperature"),
    ("mol", "amount"),
    ("cd", "intensity"),
    ("m^2", "area"),
    ("m^3", "volume"),
    ("m/s", "velocity"),
    ("m/s^2", "acceleration"),
    ("kg/m^3", "density"),
    ("Pa", "stress"),
    ("V", "electric potential"),
    ("F", "capacitance"),
    ("Ohm", "electric resistance"),
    ("H", "inductance"),
    ("Mbps", "data rate"),
    ("byte", "data"),
    ("Hz", "frequency"),
];
