// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in codename catalog and JSON record loading

use once_cell::sync::Lazy;

use crate::codename::{Codename, CodenameType};
use crate::errors::CodenameError;

const FUNCTIONS: &[(&str, &str)] = &[
    ("element_create", "Creates a DOM element with attributes and children"),
    ("element_append", "Appends a child element to a parent element"),
    ("element_remove", "Removes an element from the DOM"),
    ("event_add", "Adds an event listener to an element"),
    ("event_remove", "Removes an event listener from an element"),
    ("data_fetch", "Fetches data from a specified URL"),
    ("data_save", "Saves data to localStorage"),
    ("data_load", "Loads data from localStorage"),
    ("filter_apply", "Applies filters to codename display"),
    ("filter_reset", "Resets all active filters"),
    ("search_execute", "Executes search based on input query"),
    ("root_toggle", "Toggles expansion of root groups"),
    ("term_extract", "Extracts terms from a codename string"),
    ("term_compare", "Compares terms for similarity"),
];

const VARIABLES: &[(&str, &str)] = &[
    ("app_container", "Main container for the application"),
    ("current_filter", "Current active filter configuration"),
    ("search_query", "Current search query text"),
    ("selected_codename", "Currently selected codename"),
    ("root_state", "Expansion state of root groups"),
    ("theme_current", "Current application theme (light/dark)"),
    ("data_loaded_is", "Whether data has been loaded"),
    ("loading_is", "Whether app is in loading state"),
    ("error_message", "Current error message if any"),
    ("debug_mode_is", "Whether debug mode is enabled"),
];

const CLASSES: &[(&str, &str)] = &[
    ("app_container", "Main application container"),
    ("app_header", "Application header section"),
    ("app_content", "Main content area"),
    ("filter_panel", "Filter controls panel"),
    ("filter_button", "Filter toggle button"),
    ("filter_active", "State class for active filter"),
    ("search_input", "Search input field"),
    ("search_clear", "Search clear button"),
    ("codename_item", "Individual codename element"),
    ("codename_function", "Style class for function codenames"),
    ("codename_variable", "Style class for variable codenames"),
    ("term_container", "Container for term elements"),
    ("term_root", "First term in a codename"),
    ("root_group", "Root grouping container"),
    ("root_header", "Clickable root group header"),
    ("root_expanded", "State class for expanded root group"),
    ("lookup_panel", "Code lookup panel"),
    ("theme_dark", "Dark theme class"),
];

const PARAMETERS: &[(&str, &str)] = &[
    ("element_tag", "HTML tag for element creation"),
    ("element_attr", "Attributes for element creation"),
    ("element_children", "Child elements to append"),
    ("event_type", "Type of event to listen for"),
    ("event_callback", "Callback function for events"),
    ("filter_config", "Filter configuration object"),
    ("search_text", "Text to search for"),
    ("codename_type", "Type of codename (function, variable, etc.)"),
    ("root_name", "Name of root group"),
    ("theme_name", "Name of theme to apply"),
];

const CONSTANTS: &[(&str, &str)] = &[
    ("color_function", "Color code for function codenames"),
    ("color_variable", "Color code for variable codenames"),
    ("color_class", "Color code for class codenames"),
    ("log_level_debug", "Debug log level constant"),
    ("log_level_info", "Info log level constant"),
    ("log_level_warn", "Warning log level constant"),
    ("log_level_error", "Error log level constant"),
    ("storage_key_filter", "Storage key for filter settings"),
    ("storage_key_theme", "Storage key for theme preference"),
    ("storage_key_roots", "Storage key for root group states"),
];

const EVENTS: &[(&str, &str)] = &[
    ("click_event", "Mouse click event"),
    ("dblclick_event", "Mouse double-click event"),
    ("mouseover_event", "Mouse over event"),
    ("mouseout_event", "Mouse out event"),
    ("keydown_event", "Key down event"),
    ("input_event", "Input value change event"),
    ("load_event", "Page load event"),
    ("resize_event", "Window resize event"),
    ("storage_event", "LocalStorage change event"),
];

const PROPERTIES: &[(&str, &str)] = &[
    ("filter_func_on", "Function filter toggle state"),
    ("filter_var_on", "Variable filter toggle state"),
    ("filter_class_on", "Class filter toggle state"),
    ("filter_param_on", "Parameter filter toggle state"),
    ("filter_const_on", "Constant filter toggle state"),
    ("filter_event_on", "Event filter toggle state"),
    ("filter_prop_on", "Property filter toggle state"),
    ("root_expanded_is", "Whether a root group is expanded"),
    ("dark_mode_is", "Whether dark mode is enabled"),
    ("snippet_loaded_is", "Whether code snippets are loaded"),
];

const FILES: &[(&str, &str)] = &[
    ("index_html", "Main HTML entry point"),
    ("style_css", "Main CSS stylesheet"),
    ("main_js", "Main JavaScript entry point"),
    ("cn_schema_js", "Codename schema definitions"),
    ("cn_data_js", "Codename data collections"),
    ("storage_js", "LocalStorage persistence utilities"),
    ("dom_util_js", "DOM manipulation utilities"),
    ("filter_js", "Filtering functionality"),
    ("search_js", "Search functionality"),
    ("theme_js", "Theme management"),
];

static DEFAULT_CATALOG: Lazy<Vec<Codename>> = Lazy::new(|| {
    let sections: [(CodenameType, &[(&str, &str)]); 8] = [
        (CodenameType::Function, FUNCTIONS),
        (CodenameType::Variable, VARIABLES),
        (CodenameType::Class, CLASSES),
        (CodenameType::Parameter, PARAMETERS),
        (CodenameType::Constant, CONSTANTS),
        (CodenameType::Event, EVENTS),
        (CodenameType::Property, PROPERTIES),
        (CodenameType::File, FILES),
    ];
    sections
        .iter()
        .flat_map(|(kind, entries)| {
            entries
                .iter()
                .map(move |(name, description)| Codename::new(*name, *kind, *description))
        })
        .collect()
});

/// The built-in record set, in type order.
pub fn default_catalog() -> &'static [Codename] {
    &DEFAULT_CATALOG
}

/// Parse a JSON array of records, rejecting entries with an empty name.
pub fn parse_records(json: &str) -> Result<Vec<Codename>, CodenameError> {
    let records: Vec<Codename> = serde_json::from_str(json)?;
    if records.iter().any(|cn| cn.name().is_empty()) {
        return Err(CodenameError::EmptyName);
    }
    Ok(records)
}
