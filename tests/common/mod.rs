pub mod synthetic_form;
