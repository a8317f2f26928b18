use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    FieldOperative,
    GisSpecialist,
    EmergencyCoordinator,
    Administrator,
}

impl Role {
    pub const ALL: &[Role] = &[
        Role::Manager,
        Role::FieldOperative,
        Role::GisSpecialist,
        Role::EmergencyCoordinator,
        Role::Administrator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::FieldOperative => "field_operative",
            Role::GisSpecialist => "gis_specialist",
            Role::EmergencyCoordinator => "emergency_coordinator",
            Role::Administrator => "administrator",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Manager => "Forestry Manager",
            Role::FieldOperative => "Field Operative",
            Role::GisSpecialist => "GIS Specialist",
            Role::EmergencyCoordinator => "Emergency Response Coordinator",
            Role::Administrator => "Administrator",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "manager" => Some(Role::Manager),
            "field_operative" => Some(Role::FieldOperative),
            "gis_specialist" => Some(Role::GisSpecialist),
            "emergency_coordinator" => Some(Role::EmergencyCoordinator),
            "administrator" => Some(Role::Administrator),
            _ => None,
        }
    }

    /// The screen a role lands on right after signing in.
    pub fn entry_route(&self) -> Route {
        permitted_routes(*self)[0]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    WorkOrders,
    InspectionOverview,
    TeamAssignment,
    TaskList,
    InspectionForm,
    InteractiveMap,
    EmergencyTasks,
    EmergencyResources,
    DataManagement,
    UserManagement,
    SystemHealth,
}

impl Route {
    pub const ALL: &[Route] = &[
        Route::Dashboard,
        Route::WorkOrders,
        Route::InspectionOverview,
        Route::TeamAssignment,
        Route::TaskList,
        Route::InspectionForm,
        Route::InteractiveMap,
        Route::EmergencyTasks,
        Route::EmergencyResources,
        Route::DataManagement,
        Route::UserManagement,
        Route::SystemHealth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Dashboard => "dashboard",
            Route::WorkOrders => "work_orders",
            Route::InspectionOverview => "inspection_overview",
            Route::TeamAssignment => "team_assignment",
            Route::TaskList => "task_list",
            Route::InspectionForm => "inspection_form",
            Route::InteractiveMap => "interactive_map",
            Route::EmergencyTasks => "emergency_tasks",
            Route::EmergencyResources => "emergency_resources",
            Route::DataManagement => "data_management",
            Route::UserManagement => "user_management",
            Route::SystemHealth => "system_health",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::WorkOrders => "Work Orders",
            Route::InspectionOverview => "Inspections",
            Route::TeamAssignment => "Team Assignment",
            Route::TaskList => "Tasks",
            Route::InspectionForm => "Inspection Form",
            Route::InteractiveMap => "Interactive Map",
            Route::EmergencyTasks => "Emergency Tasks",
            Route::EmergencyResources => "Emergency Resources",
            Route::DataManagement => "Data Management",
            Route::UserManagement => "User Management",
            Route::SystemHealth => "System Health",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Role → reachable routes. The first route of each entry is where the role
/// lands after login. No route appears under more than one role.
pub const ACCESS_TABLE: &[(Role, &[Route])] = &[
    (
        Role::Manager,
        &[
            Route::Dashboard,
            Route::WorkOrders,
            Route::InspectionOverview,
            Route::TeamAssignment,
        ],
    ),
    (
        Role::FieldOperative,
        &[Route::TaskList, Route::InspectionForm],
    ),
    (Role::GisSpecialist, &[Route::InteractiveMap]),
    (
        Role::EmergencyCoordinator,
        &[Route::EmergencyTasks, Route::EmergencyResources],
    ),
    (
        Role::Administrator,
        &[
            Route::DataManagement,
            Route::UserManagement,
            Route::SystemHealth,
        ],
    ),
];

pub fn permitted_routes(role: Role) -> &'static [Route] {
    ACCESS_TABLE
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, routes)| *routes)
        .unwrap_or(&[])
}

/// The single authorization check every navigation goes through.
pub fn authorize(role: Role, route: Route) -> bool {
    permitted_routes(role).contains(&route)
}
