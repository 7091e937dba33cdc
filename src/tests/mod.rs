// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod type_model;
